//! Byte and file entry points.
//!
//! These are thin wrappers: decode, then hand the text to
//! [`parse_feature`](crate::parse_feature).

use std::path::Path;

use crate::errors::LoadError;
use crate::model::Feature;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Decode UTF-8 bytes and parse them as a feature document.
///
/// A leading byte order mark is ignored.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] when the bytes are not valid UTF-8 and
/// [`LoadError::Parse`] when the decoded text is not a valid feature.
pub fn parse_feature_bytes(bytes: &[u8]) -> Result<Feature, LoadError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    Ok(crate::parse_feature(text)?)
}

/// Read a `.feature` file from disk and parse it.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read, otherwise the
/// errors of [`parse_feature_bytes`].
pub fn load_feature(path: impl AsRef<Path>) -> Result<Feature, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} bytes from {}", bytes.len(), path.display());
    parse_feature_bytes(&bytes)
}
