//! Core domain types shared by the manifest parser and the aggregator.

use serde::Serialize;

// ---------------------------------------------------------------------------
// FileRef
// ---------------------------------------------------------------------------

/// A reference to a project file, relative to the project root.
///
/// Two references are the same file when their normalized `path` strings are
/// equal; the aggregator deduplicates on that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileRef {
    /// Normalized relative path (no leading `./`, no surrounding whitespace).
    pub path: String,
    /// Whether the reference came from an "Optional" manifest section.
    pub optional: bool,
}

impl FileRef {
    /// Build a reference, normalizing `path` into its identity form.
    pub fn new(path: impl AsRef<str>, optional: bool) -> Self {
        Self {
            path: normalize_ref_path(path.as_ref()),
            optional,
        }
    }

    /// A reference from a static file list (never optional).
    pub fn required(path: impl AsRef<str>) -> Self {
        Self::new(path, false)
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Trim whitespace and drop any leading `./` segments.
pub fn normalize_ref_path(path: &str) -> String {
    let mut rest = path.trim();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
    }
    rest.to_string()
}

// ---------------------------------------------------------------------------
// ManifestEntry
// ---------------------------------------------------------------------------

/// One link discovered in a manifest, tagged with the section it appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Title of the enclosing `##` section (may be empty).
    pub section: String,
    /// The referenced file.
    pub file: FileRef,
}
