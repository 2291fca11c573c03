use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};

use crate::application::ports::StorageError;
use crate::domain::value_objects::{ContentDigest, FileExtension, StoredObjectName};

/// Buffer size for I/O operations. 256KB provides optimal throughput
/// for most modern storage systems while balancing memory usage.
const BUFFER_SIZE: usize = 256 * 1024;

/// Content addressing with SHA-256.
///
/// The digest is the only input to a stored object's name besides the
/// resolved extension, so everything here must stay deterministic across
/// processes and restarts: same bytes in, same name out.
///
/// # Performance Optimizations
///
/// - **SIMD Acceleration**: Enabled via `sha2` crate's `asm` feature for
///   hardware-accelerated hash computation on x86_64 and ARM64.
/// - **Large Buffers**: 256KB buffers when re-hashing files already on disk.
pub struct ContentHasher;

impl ContentHasher {
    /// SHA-256 of an in-memory buffer
    pub fn digest(bytes: &[u8]) -> ContentDigest {
        let hash_bytes: [u8; 32] = Sha256::digest(bytes).into();
        ContentDigest::from_bytes(&hash_bytes)
    }

    /// Derive the storage name for a payload: `<sha256 hex><extension>`
    pub fn name(bytes: &[u8], extension: FileExtension) -> StoredObjectName {
        StoredObjectName::new(Self::digest(bytes), extension)
    }

    /// Compute SHA-256 of an existing file.
    ///
    /// Used to audit stored objects against their names; uploads hash the
    /// buffer they already hold with [`ContentHasher::digest`].
    pub async fn hash_file(path: &Path) -> Result<ContentDigest, StorageError> {
        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        let hash_bytes: [u8; 32] = hasher.finalize().into();
        Ok(ContentDigest::from_bytes(&hash_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_digest_of_known_vector() {
        // sha256("abc")
        assert_eq!(
            ContentHasher::digest(b"abc").as_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_name_is_deterministic() {
        let ext = FileExtension::new(".png").unwrap();
        let a = ContentHasher::name(b"same bytes", ext.clone());
        let b = ContentHasher::name(b"same bytes", ext);
        assert_eq!(a, b);
        assert!(a.to_string().ends_with(".png"));
    }

    #[test]
    fn test_name_differs_for_different_bytes() {
        let a = ContentHasher::name(b"one", FileExtension::empty());
        let b = ContentHasher::name(b"two", FileExtension::empty());
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_hash_file_matches_buffer_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob");
        let content = vec![3u8; BUFFER_SIZE * 2 + 17];
        tokio::fs::write(&path, &content).await.unwrap();

        let from_file = ContentHasher::hash_file(&path).await.unwrap();
        assert_eq!(from_file, ContentHasher::digest(&content));
    }
}
