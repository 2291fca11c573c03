use bytes::Bytes;

/// A decoded upload, built once at the HTTP boundary.
///
/// Immutable after construction. `size` always equals `bytes.len()`.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    bytes: Bytes,
    declared_type: String,
    declared_name: Option<String>,
}

impl UploadPayload {
    pub fn new(
        bytes: impl Into<Bytes>,
        declared_type: impl Into<String>,
        declared_name: Option<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            declared_type: declared_type.into(),
            declared_name: declared_name.filter(|name| !name.is_empty()),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn declared_name(&self) -> Option<&str> {
        self.declared_name.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}
