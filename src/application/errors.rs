//! Error types for the upload and retrieval use cases

use thiserror::Error;

use crate::application::ports::StorageError;
use crate::domain::errors::DomainError;
use crate::domain::validation::Rejection;

/// Errors from the upload workflow
#[derive(Debug, Error)]
pub enum UploadError {
    /// Client-input fault caught by the validation gate
    #[error("Upload rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from serving a stored object
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid object name: {0}")]
    InvalidName(#[from] DomainError),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for FetchError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => FetchError::NotFound(name),
            other => FetchError::Storage(other),
        }
    }
}
