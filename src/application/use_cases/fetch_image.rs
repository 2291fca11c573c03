use std::sync::Arc;

use crate::application::dto::ObjectMetadata;
use crate::application::errors::FetchError;
use crate::application::ports::{ObjectReader, ObjectStore};
use crate::domain::value_objects::StoredObjectName;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Use case: serve a stored object byte-for-byte
pub struct FetchImageUseCase {
    object_store: Arc<dyn ObjectStore>,
}

impl FetchImageUseCase {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        Self { object_store }
    }

    /// Look up an object by its public name (`<digest><ext>`)
    pub async fn execute(
        &self,
        raw_name: &str,
    ) -> Result<(ObjectMetadata, ObjectReader), FetchError> {
        let name = StoredObjectName::parse(raw_name)?;
        let (reader, size_bytes) = self.object_store.open(&name).await?;

        let content_type = name
            .extension()
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE);

        Ok((
            ObjectMetadata {
                name,
                size_bytes,
                content_type,
            },
            reader,
        ))
    }
}
