//! Output document assembly.
//!
//! Renders the preamble and file blocks into one string, then writes it to
//! disk in a single step.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use docbundle_shared::{DocBundleError, Result};

/// One inlined file: a `## <heading>` line followed by the file body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Relative path shown in the heading.
    pub heading: String,
    /// Newline-normalized content with trailing whitespace removed.
    pub body: String,
}

impl Block {
    /// Build a block, trimming trailing whitespace from `content`.
    pub fn new(heading: impl Into<String>, content: &str) -> Self {
        Self {
            heading: heading.into(),
            body: content.trim_end().to_string(),
        }
    }
}

/// The full generated document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Title line text (rendered as `# <title>`).
    pub title: String,
    /// Command named in the generation notice.
    pub regenerate_command: String,
    /// Blocks in output order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document.
    pub fn new(title: impl Into<String>, regenerate_command: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            regenerate_command: regenerate_command.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Render the preamble and every block.
    ///
    /// ```text
    /// # <title>
    ///
    /// > Generated file. Do not edit by hand; run `<command>`.
    ///
    /// ## <path>
    ///
    /// <body>
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!(
            "# {}\n\n> Generated file. Do not edit by hand; run `{}`.\n",
            self.title, self.regenerate_command
        );
        for block in &self.blocks {
            out.push_str("\n## ");
            out.push_str(&block.heading);
            out.push_str("\n\n");
            out.push_str(&block.body);
            out.push('\n');
        }
        out
    }
}

/// Hex-encoded SHA-256 of `content`.
pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Replace `path` with `content`, via a temp file and rename.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| DocBundleError::io(parent, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DocBundleError::config(format!("invalid output path {}", path.display())))?;
    let temp = parent.join(format!(".{file_name}.tmp"));

    // Write to temp file first
    std::fs::write(&temp, content).map_err(|e| DocBundleError::io(&temp, e))?;

    // Atomic rename
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(DocBundleError::io(path, e));
    }

    debug!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(())
}
