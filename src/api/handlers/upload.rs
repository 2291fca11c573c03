use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap},
    response::Json,
};
use bytes::BytesMut;
use tracing::warn;
use utoipa::ToSchema;

use crate::api::errors::ApiError;
use crate::api::router::AppState;
use crate::application::dto::{ErrorResponse, UploadResponse};
use crate::application::reference_resolver::RequestOrigin;
use crate::domain::entities::UploadPayload;
use crate::domain::validation::UploadPolicy;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Form accepted by the upload endpoint (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// Image bytes; the part's Content-Type must be `image/*`
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// POST /api/upload
/// Store an image under its content address
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "images",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored, or already present", body = UploadResponse),
        (status = 400, description = "Missing file or malformed body", body = ErrorResponse),
        (status = 413, description = "File exceeds the size ceiling", body = ErrorResponse),
        (status = 415, description = "Declared type is not image/*", body = ErrorResponse),
        (status = 500, description = "Storage fault", body = ErrorResponse)
    )
)]
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

    let policy = *state.upload_use_case.policy();
    let payload = read_file_field(&mut multipart, &policy)
        .await
        .inspect_err(|e| warn!(status = %e.status(), error = %e.message(), "Upload rejected"))?;

    let receipt = state.upload_use_case.execute(payload).await?;

    let reference = state
        .reference_resolver
        .resolve(&request_origin(&headers), &receipt.relative_path());

    Ok(Json(UploadResponse::new(&receipt, reference)))
}

/// Pull the `file` field out of the form, applying the type check before
/// reading its body and the size check on every chunk.
async fn read_file_field(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> Result<Option<UploadPayload>, ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let declared_type = field.content_type().unwrap_or_default().to_string();
        let declared_name = field.file_name().map(str::to_string);
        policy.check_type(&declared_type)?;

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            policy.check_size((buffer.len() + chunk.len()) as u64)?;
            buffer.extend_from_slice(&chunk);
        }

        return Ok(Some(UploadPayload::new(
            buffer.freeze(),
            declared_type,
            declared_name,
        )));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}

/// Origin-related headers for URL resolution
fn request_origin(headers: &HeaderMap) -> RequestOrigin {
    let value = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let origin = RequestOrigin::default()
        .with_forwarded(value("x-forwarded-proto"), value("x-forwarded-host"));

    match value(header::HOST.as_str()) {
        Some(host) => origin.with_host(host),
        None => origin,
    }
}
