//! Line-ending normalization for inlined files.

use std::path::Path;

use docbundle_shared::{DocBundleError, Result};

/// Convert `\r\n` and bare `\r` line terminators to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read a file as UTF-8 text with normalized line endings.
///
/// Invalid UTF-8 is an error, never replaced.
pub fn read_normalized(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| DocBundleError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| DocBundleError::decode(path, e))?;
    Ok(normalize_newlines(&text))
}
