use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid content digest: expected {expected}, got {actual}")]
    InvalidDigest { expected: String, actual: String },

    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),

    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),
}
