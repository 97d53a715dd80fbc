//! File and directory name checks.

use crate::error::{Error, Result};

/// Check a name that must land as a single path component.
///
/// Traversal, separators and NUL are rejected outright; other characters
/// that are invalid on common filesystems are replaced with `_`.
fn sanitize_component(kind: &str, name: &str) -> Result<String> {
    if name == "." || name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected in {}: '{}'",
            kind, name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in {}: '{}'",
            kind, name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in {}: '{}'",
            kind, name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(format!(
            "{} cannot be empty or whitespace-only",
            kind
        )));
    }

    Ok(sanitized)
}

/// Validate and sanitize a media file name.
pub fn sanitize_filename(name: &str) -> Result<String> {
    sanitize_component("file name", name)
}

/// Validate and sanitize an owner id used as a directory name.
pub fn sanitize_owner_id(owner_id: &str) -> Result<String> {
    sanitize_component("owner id", owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("ABC123.jpg").unwrap(), "ABC123.jpg");
        assert_eq!(sanitize_filename(".jpg").unwrap(), ".jpg");
        assert_eq!(sanitize_filename("file:name.jpg").unwrap(), "file_name.jpg");
        assert_eq!(
            sanitize_filename("file*with?special.jpg").unwrap(),
            "file_with_special.jpg"
        );
    }

    #[test]
    fn test_sanitize_filename_path_traversal() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename(".").is_err());
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("foo/../bar").is_err());
    }

    #[test]
    fn test_sanitize_filename_path_separators() {
        assert!(sanitize_filename("path/to/file.jpg").is_err());
        assert!(sanitize_filename("path\\to\\file.jpg").is_err());
    }

    #[test]
    fn test_sanitize_filename_null_bytes() {
        assert!(sanitize_filename("file\0name.jpg").is_err());
    }

    #[test]
    fn test_sanitize_owner_id() {
        assert_eq!(sanitize_owner_id("375193502").unwrap(), "375193502");
        assert!(sanitize_owner_id("").is_err());
        assert!(sanitize_owner_id("   ").is_err());
        assert!(sanitize_owner_id("1/2").is_err());
        assert!(sanitize_owner_id("..").is_err());
    }
}
