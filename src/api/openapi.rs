use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::api::handlers::upload::UploadForm;
use crate::application::dto::{ErrorResponse, UploadResponse};

/// OpenAPI specification for the image upload API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Image Vault API",
        version = "1.0.0",
        description = "Content-addressed image uploads with deduplication"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::upload::upload_handler,
        crate::api::handlers::download::download_handler,
    ),
    components(
        schemas(
            UploadForm,
            UploadResponse,
            ErrorResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "images", description = "Upload and retrieval of stored images")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
