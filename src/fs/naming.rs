//! Filename generation and sanitization.

use crate::error::{Error, Result};

/// Name of the archive written over the destination tree.
pub const ARCHIVE_FILENAME: &str = "snap_media.zip";

/// Sanitize a path component (folder or file name).
///
/// Snap identifiers and thumbnail labels come from upstream data and end up as
/// path components, so separators and reserved characters are replaced while
/// traversal patterns are rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Reject empty or whitespace-only names
    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Filename a thumbnail is written to, derived from its label.
pub fn thumbnail_filename(label: &str) -> Result<String> {
    Ok(format!("{}.png", sanitize_path_component(label)?))
}
