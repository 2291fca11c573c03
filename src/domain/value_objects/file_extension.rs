use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::errors::DomainError;

/// `.` followed only by lower-case alphanumerics
static EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.[a-z0-9]+$").expect("Invalid extension regex"));

/// MIME essence -> canonical extension. Anything not listed falls back to
/// the client-supplied filename.
const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/pjpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/avif", ".avif"),
    ("image/svg+xml", ".svg"),
    ("image/bmp", ".bmp"),
    ("image/x-ms-bmp", ".bmp"),
    ("image/tiff", ".tiff"),
];

/// Normalized, whitelisted file extension (possibly empty)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FileExtension(String);

impl FileExtension {
    /// Validate an extension. The empty string is the "no extension" value.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() || EXTENSION_REGEX.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidExtension(value))
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the extension for an upload.
    ///
    /// The declared MIME type wins when it is on the allow-list. Otherwise the
    /// extension of the original filename is lower-cased and used, provided it
    /// passes the pattern check. Anything else yields the empty extension.
    pub fn resolve(mime_type: &str, original_filename: Option<&str>) -> Self {
        if let Some(ext) = Self::for_mime(mime_type) {
            return ext;
        }

        original_filename
            .and_then(filename_extension)
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .and_then(|ext| Self::new(ext).ok())
            .unwrap_or_default()
    }

    /// Canonical extension for a MIME type on the allow-list
    pub fn for_mime(mime_type: &str) -> Option<Self> {
        let essence = mime_essence(mime_type);
        MIME_EXTENSIONS
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, ext)| Self((*ext).to_string()))
    }

    /// Reverse lookup used when serving stored objects
    pub fn content_type(&self) -> Option<&'static str> {
        MIME_EXTENSIONS
            .iter()
            .find(|(_, ext)| *ext == self.0)
            .map(|(mime, _)| *mime)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FileExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cased MIME type without parameters ("Image/PNG; q=1" -> "image/png")
fn mime_essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Text after the last dot of the final path component, if any
fn filename_extension(filename: &str) -> Option<&str> {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        // ".bashrc" style names have no extension
        Some(0) | None => None,
        Some(idx) => Some(&base[idx + 1..]),
    }
}
