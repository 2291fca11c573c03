use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ContentDigest, FileExtension};

static OBJECT_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<digest>[0-9a-f]{64})(?P<ext>\.[a-z0-9]+)?$")
        .expect("Invalid object name regex")
});

/// Content-derived storage key: `<digest><extension>`
///
/// Never randomly generated. The same bytes uploaded with the same
/// resolved extension always map to the same name, which is what lets the
/// filesystem answer duplicate checks without any index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredObjectName {
    digest: ContentDigest,
    extension: FileExtension,
}

impl StoredObjectName {
    pub fn new(digest: ContentDigest, extension: FileExtension) -> Self {
        Self { digest, extension }
    }

    /// Parse an untrusted name (e.g. a URL path segment).
    ///
    /// Only `<64 lower hex>[.ext]` is accepted, so a parsed name can never
    /// contain a path separator or traverse out of the storage root.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let caps = OBJECT_NAME_REGEX
            .captures(value)
            .ok_or_else(|| DomainError::InvalidObjectName(value.to_string()))?;

        let digest = ContentDigest::from_hex(&caps["digest"])?;
        let extension = match caps.name("ext") {
            Some(ext) => FileExtension::new(ext.as_str())?,
            None => FileExtension::empty(),
        };

        Ok(Self { digest, extension })
    }

    pub fn digest(&self) -> &ContentDigest {
        &self.digest
    }

    pub fn extension(&self) -> &FileExtension {
        &self.extension
    }
}

impl std::fmt::Display for StoredObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.digest, self.extension)
    }
}

impl std::str::FromStr for StoredObjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest() -> ContentDigest {
        ContentDigest::from_hex("ab".repeat(32)).unwrap()
    }

    #[test]
    fn test_display_concatenates_digest_and_extension() {
        let name = StoredObjectName::new(digest(), FileExtension::new(".png").unwrap());
        assert_eq!(name.to_string(), format!("{}.png", "ab".repeat(32)));
    }

    #[test]
    fn test_bare_digest_name() {
        let name = StoredObjectName::new(digest(), FileExtension::empty());
        assert_eq!(name.to_string(), "ab".repeat(32));
    }

    #[test]
    fn test_parse_round_trips_display() {
        let raw = format!("{}.webp", "0f".repeat(32));
        let name = StoredObjectName::parse(&raw).unwrap();
        assert_eq!(name.to_string(), raw);
        assert_eq!(name.extension().as_str(), ".webp");
    }

    #[test]
    fn test_parse_rejects_traversal_and_garbage() {
        let bad_names = vec![
            "../etc/passwd".to_string(),
            String::new(),
            ".staging".to_string(),
            format!("{}/x.png", "a".repeat(64)),
            format!("{}.PNG", "a".repeat(64)),
            format!("{}.png", "A".repeat(64)),
            format!("{}.", "a".repeat(64)),
            "a".repeat(63),
        ];

        for bad in &bad_names {
            assert!(StoredObjectName::parse(bad).is_err(), "accepted {bad:?}");
        }
    }
}
