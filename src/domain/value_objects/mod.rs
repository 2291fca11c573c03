mod content_digest;
mod file_extension;
mod object_name;

pub use content_digest::ContentDigest;
pub use file_extension::FileExtension;
pub use object_name::StoredObjectName;
