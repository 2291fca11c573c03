//! Offline consistency check for an upload directory
//!
//! Every regular file in the storage root must be named `<digest><ext>`
//! and its SHA-256 must equal that digest. The staging directory is
//! skipped.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::application::ports::StorageError;
use crate::domain::value_objects::StoredObjectName;
use crate::infrastructure::storage::{ContentHasher, STAGING_DIR};

/// An object whose bytes no longer hash to its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestMismatch {
    pub path: PathBuf,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct AuditReport {
    /// Objects re-hashed
    pub checked: usize,
    /// Entries whose name is not a valid object name
    pub invalid_names: Vec<PathBuf>,
    pub mismatches: Vec<DigestMismatch>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.invalid_names.is_empty() && self.mismatches.is_empty()
    }
}

/// Walk `root` and re-hash every stored object
pub async fn audit_store(root: &Path) -> Result<AuditReport, StorageError> {
    let mut report = AuditReport::default();
    let mut entries = fs::read_dir(root).await?;

    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        if file_name == STAGING_DIR {
            continue;
        }

        let path = entry.path();
        let is_file = entry.file_type().await?.is_file();
        let name = match file_name.to_str().map(StoredObjectName::parse) {
            Some(Ok(name)) if is_file => name,
            _ => {
                report.invalid_names.push(path);
                continue;
            }
        };

        let actual = ContentHasher::hash_file(&path).await?;
        report.checked += 1;

        if &actual != name.digest() {
            report.mismatches.push(DigestMismatch {
                path,
                expected: name.digest().to_string(),
                actual: actual.to_string(),
            });
        } else {
            debug!(object = %name, "Object verified");
        }
    }

    report.invalid_names.sort();
    report.mismatches.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(report)
}
