use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;
use utoipa::ToSchema;

use crate::application::ports::ObjectStore;

const SERVICE_NAME: &str = "image_vault";
const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Basic health check response
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub version: String,
}

/// Storage readiness response
#[derive(serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub ok: bool,
    pub service: String,
    pub storage: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
/// Liveness check (no storage check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/ready
/// Readiness check: the storage root must be usable
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Storage root is usable", body = ReadinessResponse),
        (status = 503, description = "Storage root is not usable", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(object_store): State<Arc<dyn ObjectStore>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let start_time = Instant::now();
    let check = tokio::time::timeout(READINESS_TIMEOUT, object_store.health()).await;
    let response_time_ms = start_time.elapsed().as_millis() as u64;

    let (status, storage, error) = match check {
        Ok(Ok(())) => (StatusCode::OK, "ready", None),
        Ok(Err(e)) => {
            warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", Some(e.to_string()))
        }
        Err(_) => {
            warn!("Readiness check timed out");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "timeout",
                Some(format!(
                    "storage check timed out after {} seconds",
                    READINESS_TIMEOUT.as_secs()
                )),
            )
        }
    };

    (
        status,
        Json(ReadinessResponse {
            ok: status == StatusCode::OK,
            service: SERVICE_NAME.to_string(),
            storage: storage.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
            error,
        }),
    )
}
