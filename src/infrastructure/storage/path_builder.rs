use std::path::{Path, PathBuf};

use crate::domain::value_objects::StoredObjectName;

/// Directory (under the root) holding in-flight writes
pub const STAGING_DIR: &str = ".staging";

/// Utility for generating storage paths
#[derive(Debug, Clone)]
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging directory: /root/.staging
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// Generate staging path: /root/.staging/{uuid}
    pub fn staging_path(&self, id: uuid::Uuid) -> PathBuf {
        self.staging_dir().join(id.to_string())
    }

    /// Generate final content-addressable path: /root/{digest}{ext}
    pub fn object_path(&self, name: &StoredObjectName) -> PathBuf {
        self.root.join(name.to_string())
    }
}
