use std::sync::Arc;
use tracing::info;

use crate::application::dto::UploadReceipt;
use crate::application::errors::UploadError;
use crate::application::ports::ObjectStore;
use crate::domain::entities::UploadPayload;
use crate::domain::validation::{Rejection, UploadPolicy};
use crate::domain::value_objects::FileExtension;
use crate::infrastructure::storage::ContentHasher;

/// Use case: store an uploaded image under its content address
pub struct UploadImageUseCase {
    object_store: Arc<dyn ObjectStore>,
    policy: UploadPolicy,
}

impl UploadImageUseCase {
    pub fn new(object_store: Arc<dyn ObjectStore>, policy: UploadPolicy) -> Self {
        Self {
            object_store,
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Execute upload workflow
    pub async fn execute(
        &self,
        payload: Option<UploadPayload>,
    ) -> Result<UploadReceipt, UploadError> {
        // 1. Gate: nothing below runs for a rejected upload
        let Some(payload) = payload else {
            return Err(Rejection::MissingPayload.into());
        };
        self.policy.check(Some(&payload))?;

        // 2. Canonical name from content + resolved extension
        let extension = FileExtension::resolve(payload.declared_type(), payload.declared_name());
        let size_bytes = payload.size();
        let bytes = payload.into_bytes();

        let name = {
            let bytes = bytes.clone();
            tokio::task::spawn_blocking(move || ContentHasher::name(&bytes, extension))
                .await
                .map_err(|e| UploadError::Internal(format!("hashing task failed: {}", e)))?
        };

        // 3. Single side effect: exclusive publish
        let outcome = self.object_store.put(&name, bytes).await?;

        let dedup = outcome.is_duplicate();
        info!(
            digest = %name.digest(),
            object = %name,
            size_bytes,
            dedup,
            "Image stored"
        );

        Ok(UploadReceipt {
            name: outcome.name().clone(),
            size_bytes,
            dedup,
        })
    }
}
