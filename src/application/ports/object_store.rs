use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::StoredObjectName;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage root unavailable: {0}")]
    Unavailable(String),
}

/// Result of a successful `put`. There is no third case: any other
/// filesystem condition is a `StorageError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOutcome {
    Created(StoredObjectName),
    AlreadyExists(StoredObjectName),
}

impl StorageOutcome {
    pub fn name(&self) -> &StoredObjectName {
        match self {
            StorageOutcome::Created(name) | StorageOutcome::AlreadyExists(name) => name,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageOutcome::AlreadyExists(_))
    }
}

/// Type alias for async reader
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Port for the content-addressed object namespace
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Publish `bytes` under `name` with exclusive-create semantics.
    /// An existing object is never overwritten.
    async fn put(&self, name: &StoredObjectName, bytes: Bytes)
        -> Result<StorageOutcome, StorageError>;

    /// Open a stored object, returning a reader and its length
    async fn open(&self, name: &StoredObjectName) -> Result<(ObjectReader, u64), StorageError>;

    /// Readiness check for the storage root
    async fn health(&self) -> Result<(), StorageError>;
}
