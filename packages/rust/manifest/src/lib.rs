//! `llms.txt` manifest model.
//!
//! A manifest groups links to project files under `##` sections. This crate
//! turns manifest text into an ordered list of [`ManifestEntry`] values;
//! reading the file and resolving the links is left to `docbundle-core`.

mod parser;

use docbundle_shared::ManifestEntry;
use tracing::debug;

pub use parser::{is_external, link_target, parse_manifest};

/// A parsed manifest together with its raw text.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Manifest path relative to the project root (e.g. `llms.txt`).
    pub path: String,
    /// Newline-normalized manifest text, inlined verbatim into the output.
    pub raw: String,
    /// Every local link, in manifest order, duplicates included.
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse manifest text read from `path`.
    pub fn parse(path: impl Into<String>, raw: impl Into<String>) -> Self {
        let path = path.into();
        let raw = raw.into();
        let entries = parse_manifest(&raw);

        debug!(
            %path,
            entries = entries.len(),
            optional = entries.iter().filter(|e| e.file.optional).count(),
            "manifest parsed"
        );

        Self { path, raw, entries }
    }
}
