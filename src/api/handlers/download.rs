use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::ApiError;
use crate::application::dto::ErrorResponse;
use crate::application::use_cases::FetchImageUseCase;

/// Stored objects never change under a given name
const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// GET /files/{name}
/// Serve a stored object with streaming response
#[utoipa::path(
    get,
    path = "/files/{name}",
    tag = "images",
    params(
        ("name" = String, Path, description = "Object name: 64 hex digits plus optional extension")
    ),
    responses(
        (status = 200, description = "Stored bytes, Content-Type derived from the extension"),
        (status = 304, description = "Client copy is current"),
        (status = 400, description = "Not a valid object name", body = ErrorResponse),
        (status = 404, description = "No such object", body = ErrorResponse)
    )
)]
pub async fn download_handler(
    State(use_case): State<Arc<FetchImageUseCase>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let (metadata, reader) = use_case.execute(&name).await?;
    let etag = format!("\"{}\"", metadata.name.digest());

    let builder = Response::builder()
        .header(header::ETAG, &etag)
        .header(header::CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL);

    let response = if if_none_match(&headers, &etag) {
        builder.status(StatusCode::NOT_MODIFIED).body(Body::empty())
    } else {
        builder
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, metadata.content_type)
            .header(header::CONTENT_LENGTH, metadata.size_bytes.to_string())
            .header(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            )
            .body(Body::from_stream(ReaderStream::new(reader)))
    };

    response.map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))
}

fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .map(str::trim)
                .map(|candidate| candidate.strip_prefix("W/").unwrap_or(candidate))
                .any(|candidate| candidate == "*" || candidate == etag)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_if_none_match() {
        let etag = "\"abc\"";
        let mut headers = HeaderMap::new();
        assert!(!if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"xyz\", \"abc\""));
        assert!(if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"xyz\""));
        assert!(!if_none_match(&headers, etag));
    }

    #[test]
    fn test_if_none_match_uses_weak_comparison() {
        let etag = "\"abc\"";
        let mut headers = HeaderMap::new();

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("W/\"abc\""));
        assert!(if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("W/\"xyz\", W/\"abc\""));
        assert!(if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("W/\"xyz\""));
        assert!(!if_none_match(&headers, etag));
    }
}
