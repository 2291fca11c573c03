pub mod cors;
pub mod request_logging;

pub use cors::create_cors_layer;
pub use request_logging::request_logging_middleware;
