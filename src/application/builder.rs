use std::sync::Arc;

use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::ObjectStore,
    reference_resolver::ReferenceResolver,
    use_cases::{FetchImageUseCase, UploadImageUseCase},
};
use crate::config::Config;
use crate::domain::validation::UploadPolicy;
use crate::infrastructure::storage::LocalFilesystemStore;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            object_store: None,
        }
    }

    /// Initialize the filesystem store rooted at `UPLOAD_DIR`
    pub async fn with_storage(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let store = LocalFilesystemStore::with_durability(
            self.config.upload_dir.clone(),
            self.config.durable_writes,
        );
        store.init().await.map_err(|e| {
            tracing::error!(
                "Failed to initialize upload directory {:?}: {}",
                self.config.upload_dir,
                e
            );
            e
        })?;

        info!(
            upload_dir = %self.config.upload_dir.display(),
            durable_writes = self.config.durable_writes,
            "Object store initialized"
        );

        self.object_store = Some(Arc::new(store));
        Ok(self)
    }

    /// Use an already constructed store (tests, alternative backends)
    pub fn with_object_store(mut self, object_store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(object_store);
        self
    }

    /// Build the application state
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let object_store = self
            .object_store
            .ok_or("Object store not initialized. Call with_storage() first.")?;

        let policy = UploadPolicy::new(self.config.max_upload_bytes);
        match policy.max_upload_bytes() {
            Some(limit) => info!(max_upload_bytes = limit, "Upload size ceiling enabled"),
            None => info!("Upload size ceiling disabled"),
        }

        let upload_use_case = Arc::new(UploadImageUseCase::new(
            Arc::clone(&object_store),
            policy,
        ));
        let fetch_use_case = Arc::new(FetchImageUseCase::new(Arc::clone(&object_store)));
        let reference_resolver = Arc::new(ReferenceResolver::new(
            self.config.public_base_url.as_deref(),
            self.config.port,
        ));

        Ok(AppState {
            object_store,
            upload_use_case,
            fetch_use_case,
            reference_resolver,
        })
    }
}
