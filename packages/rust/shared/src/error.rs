//! Error types for docbundle.
//!
//! Library crates use [`DocBundleError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docbundle operations.
#[derive(Debug, thiserror::Error)]
pub enum DocBundleError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The link manifest required by the manifest pipeline is absent.
    #[error("manifest not found at {path:?}")]
    MissingManifest { path: PathBuf },

    /// A file could not be decoded as UTF-8 text.
    #[error("{path:?} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocBundleError>;

impl DocBundleError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Report a missing manifest at `path`.
    pub fn missing_manifest(path: impl Into<PathBuf>) -> Self {
        Self::MissingManifest { path: path.into() }
    }

    /// Wrap a UTF-8 decoding failure with the offending path.
    pub fn decode(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocBundleError::config("unknown mode 'zip'");
        assert_eq!(err.to_string(), "config error: unknown mode 'zip'");

        let err = DocBundleError::missing_manifest("/tmp/project/llms.txt");
        assert!(err.to_string().contains("manifest not found"));
        assert!(err.to_string().contains("llms.txt"));
    }

    #[test]
    fn decode_error_names_path() {
        let source = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = DocBundleError::decode("docs/broken.md", source);
        assert!(err.to_string().contains("docs/broken.md"));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
