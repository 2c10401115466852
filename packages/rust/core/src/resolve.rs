//! Resolution of file references against the project root.
//!
//! A reference is only inlined when its canonical location is a regular file
//! inside the canonical root. Symlinks are followed before the containment
//! check, so a link pointing out of the project is rejected like `../x`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use docbundle_shared::{DocBundleError, Result};

/// Why a reference was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// An earlier reference (or the manifest/output itself) already names it.
    Duplicate,
    /// Resolves outside the project root.
    OutsideRoot,
    /// Does not exist.
    Missing,
    /// Exists but is not a regular file.
    NotAFile,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Duplicate => "duplicate",
            Self::OutsideRoot => "outside root",
            Self::Missing => "missing",
            Self::NotAFile => "not a file",
        };
        f.write_str(s)
    }
}

/// Outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Canonical path of a file to inline.
    File(PathBuf),
    /// The reference is dropped.
    Skip(SkipReason),
}

/// Resolves relative references under a canonicalized project root.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    /// Canonicalize `root`. Fails if the root itself does not exist.
    pub fn new(root: &Path) -> Result<Self> {
        let root = root.canonicalize().map_err(|e| DocBundleError::io(root, e))?;
        Ok(Self { root })
    }

    /// Resolve `rel` to an includable file, or say why it is skipped.
    pub fn resolve(&self, rel: &str) -> Resolution {
        let resolution = self.classify(rel);
        if let Resolution::Skip(reason) = resolution {
            debug!(path = rel, %reason, "skipping reference");
        }
        resolution
    }

    fn classify(&self, rel: &str) -> Resolution {
        let candidate = match self.root.join(rel).canonicalize() {
            Ok(path) => path,
            Err(_) => return Resolution::Skip(SkipReason::Missing),
        };

        if !candidate.starts_with(&self.root) {
            return Resolution::Skip(SkipReason::OutsideRoot);
        }
        if !candidate.is_file() {
            return Resolution::Skip(SkipReason::NotAFile);
        }
        Resolution::File(candidate)
    }
}
