//! Upload admission checks
//!
//! Everything here is a pure function of the declared type and byte
//! length. The checks run before any hashing or disk I/O, so a rejected
//! upload never touches the storage root.

use thiserror::Error;

use crate::domain::entities::UploadPayload;

/// Category prefix every accepted declared type must carry
const IMAGE_PREFIX: &str = "image/";

/// Default ceiling: 20 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Why an upload was refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing file")]
    MissingPayload,

    #[error("only image allowed (got {0:?})")]
    UnsupportedType(String),

    #[error("file too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: u64, limit: u64 },
}

/// Validation result type
pub type ValidationResult<T> = Result<T, Rejection>;

/// Admission policy for uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_upload_bytes: Option<u64>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_UPLOAD_BYTES))
    }
}

impl UploadPolicy {
    /// `None` disables the size ceiling
    pub fn new(max_upload_bytes: Option<u64>) -> Self {
        Self { max_upload_bytes }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn max_upload_bytes(&self) -> Option<u64> {
        self.max_upload_bytes
    }

    /// Full gate: presence, then type, then size
    pub fn check(&self, payload: Option<&UploadPayload>) -> ValidationResult<()> {
        let payload = payload.ok_or(Rejection::MissingPayload)?;

        self.check_type(payload.declared_type())?;

        if payload.size() == 0 {
            return Err(Rejection::MissingPayload);
        }

        self.check_size(payload.size())
    }

    /// Type-only check, usable before the body of a field is read
    pub fn check_type(&self, declared_type: &str) -> ValidationResult<()> {
        let is_image = declared_type
            .get(..IMAGE_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_PREFIX));

        if is_image {
            Ok(())
        } else {
            Err(Rejection::UnsupportedType(declared_type.to_string()))
        }
    }

    /// Size-only check, usable on a running total while streaming
    pub fn check_size(&self, size: u64) -> ValidationResult<()> {
        match self.max_upload_bytes {
            Some(limit) if size > limit => Err(Rejection::PayloadTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}
