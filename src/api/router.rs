use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{download_handler, health_handler, readiness_handler, upload_handler};
use crate::api::middleware::{create_cors_layer, request_logging_middleware};
use crate::api::openapi::swagger_ui;
use crate::application::ports::ObjectStore;
use crate::application::reference_resolver::ReferenceResolver;
use crate::application::use_cases::{FetchImageUseCase, UploadImageUseCase};

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub object_store: Arc<dyn ObjectStore>,
    pub upload_use_case: Arc<UploadImageUseCase>,
    pub fetch_use_case: Arc<FetchImageUseCase>,
    pub reference_resolver: Arc<ReferenceResolver>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let fetch_state = Arc::clone(&state.fetch_use_case);
    let store_state = Arc::clone(&state.object_store);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(store_state),
        )
        // The upload gate enforces the size ceiling while streaming
        .route(
            "/api/upload",
            post(upload_handler)
                .layer(DefaultBodyLimit::disable())
                .with_state(state),
        )
        .route(
            "/files/{name}",
            get(download_handler).with_state(fetch_state),
        )
        .merge(swagger_ui())
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(create_cors_layer())
}
