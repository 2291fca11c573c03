mod content_hasher;
mod local_filesystem_store;
mod path_builder;
mod store_audit;

pub use content_hasher::ContentHasher;
pub use local_filesystem_store::{LocalFilesystemStore, STAGING_GRACE_PERIOD};
pub use path_builder::{PathBuilder, STAGING_DIR};
pub use store_audit::{audit_store, AuditReport, DigestMismatch};
