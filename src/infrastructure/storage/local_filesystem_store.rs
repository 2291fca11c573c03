use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{ObjectReader, ObjectStore, StorageError, StorageOutcome};
use crate::domain::value_objects::StoredObjectName;
use crate::infrastructure::storage::PathBuilder;

/// Staging files younger than this may belong to a live writer sharing the
/// same root and are left alone by the startup sweep.
pub const STAGING_GRACE_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Local filesystem object store.
///
/// Layout is one flat directory of `<digest><ext>` files plus a private
/// `.staging/` directory for in-flight writes. An object only becomes
/// visible under its content name once all of its bytes are on disk: the
/// bytes are staged first and then hard-linked to the final name. `link(2)`
/// fails with `EEXIST` instead of replacing an existing entry, which makes it
/// the exclusive-create step that decides between `Created` and
/// `AlreadyExists` under concurrency.
pub struct LocalFilesystemStore {
    path_builder: PathBuilder,
    durable_writes: bool,
}

impl LocalFilesystemStore {
    pub fn new(root: PathBuf) -> Self {
        Self::with_durability(root, true)
    }

    pub fn with_durability(root: PathBuf, durable_writes: bool) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            durable_writes,
        }
    }

    pub fn root(&self) -> &Path {
        self.path_builder.root()
    }

    /// Create the storage root and staging directory, and sweep staging
    /// files left behind by a previous crash.
    pub async fn init(&self) -> Result<(), StorageError> {
        let staging_dir = self.path_builder.staging_dir();
        fs::create_dir_all(&staging_dir).await?;

        let now = SystemTime::now();
        let mut swept = 0usize;
        let mut entries = fs::read_dir(&staging_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let modified = match entry.metadata().await.and_then(|meta| meta.modified()) {
                Ok(modified) => modified,
                // Published and cleaned up by its writer in the meantime
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!("Failed to inspect staging file {:?}: {}", path, e);
                    continue;
                }
            };

            let age = now.duration_since(modified).unwrap_or_default();
            if age < STAGING_GRACE_PERIOD {
                debug!("Keeping recent staging file {:?}", path);
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => swept += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove stale staging file {:?}: {}", path, e),
            }
        }

        if swept > 0 {
            info!(swept, "Removed stale staging files");
        }

        Ok(())
    }

    /// Write the full payload to a fresh staging file
    async fn stage(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        if self.durable_writes {
            file.sync_all().await?;
        }

        Ok(())
    }

    /// Persist the new directory entry. Failure here is logged only: the
    /// object is already published.
    async fn sync_root(&self) {
        match File::open(self.root()).await {
            Ok(dir) => {
                if let Err(e) = dir.sync_all().await {
                    warn!("Failed to sync storage root after publish: {}", e);
                }
            }
            Err(e) => warn!("Failed to open storage root for sync: {}", e),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalFilesystemStore {
    async fn put(
        &self,
        name: &StoredObjectName,
        bytes: Bytes,
    ) -> Result<StorageOutcome, StorageError> {
        let final_path = self.path_builder.object_path(name);

        // Fast path for repeat uploads; the link below still decides races.
        if fs::symlink_metadata(&final_path).await.is_ok() {
            debug!(object = %name, "Object already exists (deduplication)");
            return Ok(StorageOutcome::AlreadyExists(name.clone()));
        }

        let staging_path = self.path_builder.staging_path(Uuid::new_v4());
        debug!("Staging object {} at {:?}", name, staging_path);
        if let Err(e) = self.stage(&staging_path, &bytes).await {
            warn!("Failed to stage object {}: {}", name, e);
            let _ = fs::remove_file(&staging_path).await;
            return Err(e);
        }

        let published = fs::hard_link(&staging_path, &final_path).await;

        // The staging entry is redundant whether or not the link succeeded
        if let Err(e) = fs::remove_file(&staging_path).await {
            warn!("Failed to remove staging file {:?}: {}", staging_path, e);
        }

        match published {
            Ok(()) => {
                if self.durable_writes {
                    self.sync_root().await;
                }
                debug!(object = %name, size = bytes.len(), "Object created");
                Ok(StorageOutcome::Created(name.clone()))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(object = %name, "Lost publish race, object already exists");
                Ok(StorageOutcome::AlreadyExists(name.clone()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn open(&self, name: &StoredObjectName) -> Result<(ObjectReader, u64), StorageError> {
        let path = self.path_builder.object_path(name);

        let file = File::open(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(name.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        let size = file.metadata().await?.len();
        let reader: ObjectReader = Box::pin(BufReader::new(file));

        Ok((reader, size))
    }

    async fn health(&self) -> Result<(), StorageError> {
        let staging_dir = self.path_builder.staging_dir();
        match fs::metadata(&staging_dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StorageError::Unavailable(format!(
                "{} is not a directory",
                staging_dir.display()
            ))),
            Err(e) => Err(StorageError::Unavailable(format!(
                "{}: {}",
                staging_dir.display(),
                e
            ))),
        }
    }
}
