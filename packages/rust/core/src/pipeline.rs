//! End-to-end generation pipelines.
//!
//! Two independent flows produce the same kind of document:
//! 1. **Static list** — inline the configured files in order.
//! 2. **Manifest** — inline `llms.txt` itself, then every local file it
//!    links to, in manifest order.
//!
//! The whole document is rendered in memory before the output is touched, so
//! a fatal error (missing manifest, undecodable file) leaves any previous
//! output in place.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use docbundle_manifest::Manifest;
use docbundle_shared::{
    BuildMode, BuildSettings, DocBundleError, FileRef, Result, normalize_ref_path,
};

use crate::assembler::{Block, Document, sha256_hex, write_output};
use crate::normalize::read_normalized;
use crate::resolve::{Resolution, Resolver, SkipReason};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A reference left out of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRef {
    /// Normalized relative path.
    pub path: String,
    /// Why it was dropped.
    pub reason: SkipReason,
}

/// A document rendered in memory, not yet written.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The assembled document.
    pub document: Document,
    /// Rendered text.
    pub text: String,
    /// References that produced no block.
    pub skipped: Vec<SkippedRef>,
}

/// Output from a successful generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Absolute path of the written document.
    pub output_path: PathBuf,
    /// Pipeline that produced it.
    pub mode: BuildMode,
    /// Number of blocks written (the manifest block included).
    pub blocks: usize,
    /// References that produced no block.
    pub skipped: Vec<SkippedRef>,
    /// Size of the written document.
    pub bytes: usize,
    /// SHA-256 of the written document.
    pub sha256: String,
}

/// One manifest link with the decision the aggregator makes for it.
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    /// Enclosing section title.
    pub section: String,
    /// Normalized relative path.
    pub path: String,
    /// Listed under an "Optional" section.
    pub optional: bool,
    /// `None` when the file is inlined.
    pub skipped: Option<SkipReason>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Regenerate the output document with the configured pipeline.
#[instrument(skip_all, fields(root = %settings.root.display(), mode = %settings.mode))]
pub fn generate(settings: &BuildSettings) -> Result<GenerateResult> {
    let rendered = match settings.mode {
        BuildMode::Static => render_static(settings)?,
        BuildMode::Manifest => render_manifest(settings)?,
    };

    let output_path = settings.root.join(&settings.output_path);
    write_output(&output_path, &rendered.text)?;

    let result = GenerateResult {
        output_path,
        mode: settings.mode,
        blocks: rendered.document.blocks.len(),
        skipped: rendered.skipped,
        bytes: rendered.text.len(),
        sha256: sha256_hex(&rendered.text),
    };

    info!(
        path = %result.output_path.display(),
        blocks = result.blocks,
        skipped = result.skipped.len(),
        bytes = result.bytes,
        "output regenerated"
    );

    Ok(result)
}

/// Render the document from the static file list.
#[instrument(skip_all, fields(files = settings.files.len()))]
pub fn render_static(settings: &BuildSettings) -> Result<Rendered> {
    let resolver = Resolver::new(&settings.root)?;
    let mut collector = Collector::new(&resolver, settings, &[settings.output_path.as_str()]);

    for path in &settings.files {
        collector.add(&FileRef::required(path))?;
    }

    Ok(collector.finish())
}

/// Render the document from the link manifest.
///
/// The manifest itself is the first block; the files it links to follow.
#[instrument(skip_all, fields(manifest = %settings.manifest_path))]
pub fn render_manifest(settings: &BuildSettings) -> Result<Rendered> {
    let resolver = Resolver::new(&settings.root)?;
    let manifest = load_manifest(settings)?;

    let reserved = [manifest.path.as_str(), settings.output_path.as_str()];
    let mut collector = Collector::new(&resolver, settings, &reserved);
    collector.document.push(Block::new(&manifest.path, &manifest.raw));

    for entry in &manifest.entries {
        collector.add(&entry.file)?;
    }

    Ok(collector.finish())
}

/// Read and parse the manifest. A missing manifest is fatal.
pub fn load_manifest(settings: &BuildSettings) -> Result<Manifest> {
    let rel = normalize_ref_path(&settings.manifest_path);
    let path = settings.root.join(&rel);

    if !path.is_file() {
        return Err(DocBundleError::missing_manifest(path));
    }

    let raw = read_normalized(&path)?;
    Ok(Manifest::parse(rel, raw))
}

/// Report, for every manifest link, whether it would be inlined.
pub fn inspect_manifest(settings: &BuildSettings) -> Result<Vec<LinkReport>> {
    let resolver = Resolver::new(&settings.root)?;
    let manifest = load_manifest(settings)?;
    let mut seen = seed_seen(&[manifest.path.as_str(), settings.output_path.as_str()]);

    let reports = manifest
        .entries
        .into_iter()
        .map(|entry| {
            let skipped = if !seen.insert(entry.file.path.clone()) {
                Some(SkipReason::Duplicate)
            } else {
                match resolver.resolve(&entry.file.path) {
                    Resolution::File(_) => None,
                    Resolution::Skip(reason) => Some(reason),
                }
            };
            LinkReport {
                section: entry.section,
                path: entry.file.path,
                optional: entry.file.optional,
                skipped,
            }
        })
        .collect();

    Ok(reports)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seed_seen(paths: &[&str]) -> HashSet<String> {
    paths.iter().map(|p| normalize_ref_path(p)).collect()
}

/// Accumulates blocks, deduplicating references on first sight.
struct Collector<'a> {
    resolver: &'a Resolver,
    seen: HashSet<String>,
    document: Document,
    skipped: Vec<SkippedRef>,
}

impl<'a> Collector<'a> {
    fn new(resolver: &'a Resolver, settings: &BuildSettings, reserved: &[&str]) -> Self {
        Self {
            resolver,
            seen: seed_seen(reserved),
            document: Document::new(&settings.title, &settings.regenerate_command),
            skipped: Vec::new(),
        }
    }

    fn add(&mut self, file: &FileRef) -> Result<()> {
        if !self.seen.insert(file.path.clone()) {
            debug!(path = %file, "skipping duplicate reference");
            self.skip(file, SkipReason::Duplicate);
            return Ok(());
        }

        match self.resolver.resolve(&file.path) {
            Resolution::File(path) => {
                let text = read_normalized(&path)?;
                debug!(path = %file, optional = file.optional, bytes = text.len(), "inlining file");
                self.document.push(Block::new(&file.path, &text));
            }
            Resolution::Skip(reason) => self.skip(file, reason),
        }
        Ok(())
    }

    fn skip(&mut self, file: &FileRef, reason: SkipReason) {
        self.skipped.push(SkippedRef {
            path: file.path.clone(),
            reason,
        });
    }

    fn finish(self) -> Rendered {
        let text = self.document.render();
        Rendered {
            document: self.document,
            text,
            skipped: self.skipped,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
