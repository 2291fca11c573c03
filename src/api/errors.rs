use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::dto::ErrorResponse;
use crate::application::errors::{FetchError, UploadError};
use crate::domain::validation::Rejection;

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

// Convert use case errors to API errors

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        let status = match rejection {
            Rejection::MissingPayload => StatusCode::BAD_REQUEST,
            Rejection::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Rejection::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        };
        ApiError::new(status, rejection.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Rejected(rejection) => rejection.into(),
            // Filesystem details stay in the log
            UploadError::Storage(e) => {
                error!(error = %e, "Upload failed with storage fault");
                ApiError::internal_error("storage error")
            }
            UploadError::Internal(msg) => {
                error!(error = %msg, "Upload failed");
                ApiError::internal_error("internal error")
            }
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidName(e) => ApiError::bad_request(e.to_string()),
            FetchError::NotFound(_) => ApiError::not_found("not found"),
            FetchError::Storage(e) => {
                error!(error = %e, "Fetch failed with storage fault");
                ApiError::internal_error("storage error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StorageError;
    use crate::domain::errors::DomainError;

    #[test]
    fn test_rejections_map_to_distinct_statuses() {
        let cases = [
            (Rejection::MissingPayload, StatusCode::BAD_REQUEST),
            (
                Rejection::UnsupportedType("text/plain".to_string()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                Rejection::PayloadTooLarge { size: 11, limit: 10 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];

        for (rejection, status) in cases {
            let api_error = ApiError::from(UploadError::Rejected(rejection));
            assert_eq!(api_error.status(), status);
        }
    }

    #[test]
    fn test_storage_fault_is_server_error_without_details() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/srv/uploads/secret");
        let api_error = ApiError::from(UploadError::Storage(StorageError::Io(io)));
        assert_eq!(api_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_error.message().contains("/srv/uploads"));
    }

    #[test]
    fn test_fetch_errors() {
        let invalid = ApiError::from(FetchError::InvalidName(DomainError::InvalidObjectName(
            "..".to_string(),
        )));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(FetchError::NotFound("abc".to_string()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
