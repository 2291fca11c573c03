use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::StoredObjectName;

/// Public path prefix under which stored objects are served
pub const FILES_PREFIX: &str = "/files";

/// Where a stored object can be fetched from. Derived per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ObjectReference {
    /// Origin-relative path, e.g. `/files/<digest>.png`
    pub path: String,
    /// Absolute URL built from the resolved base URL
    pub url: String,
}

impl ObjectReference {
    /// `/files/<name>`
    pub fn relative_path(name: &StoredObjectName) -> String {
        format!("{}/{}", FILES_PREFIX, name)
    }
}

/// Outcome of the upload use case, before URL resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub name: StoredObjectName,
    pub size_bytes: u64,
    pub dedup: bool,
}

impl UploadReceipt {
    pub fn hash(&self) -> &str {
        self.name.digest().as_hex()
    }

    pub fn relative_path(&self) -> String {
        ObjectReference::relative_path(&self.name)
    }
}

/// DTO for a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub ok: bool,
    /// Lower-case hex SHA-256 of the stored bytes
    pub hash: String,
    /// True when identical bytes were already stored
    pub dedup: bool,
    pub url: String,
    pub path: String,
}

impl UploadResponse {
    pub fn new(receipt: &UploadReceipt, reference: ObjectReference) -> Self {
        Self {
            ok: true,
            hash: receipt.hash().to_string(),
            dedup: receipt.dedup,
            url: reference.url,
            path: reference.path,
        }
    }
}

/// DTO for any failed request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Metadata for a stored object being served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub name: StoredObjectName,
    pub size_bytes: u64,
    pub content_type: &'static str,
}
