//! Project configuration for docbundle.
//!
//! Config lives at `<project root>/docbundle.toml` and is optional.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocBundleError, Result};

/// Configuration file name, looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "docbundle.toml";

/// Conventional manifest file name.
pub const DEFAULT_MANIFEST_PATH: &str = "llms.txt";

/// Conventional output file name.
pub const DEFAULT_OUTPUT_PATH: &str = "llms-full.txt";

// ---------------------------------------------------------------------------
// Config structs (matching docbundle.toml schema)
// ---------------------------------------------------------------------------

/// Which pipeline produces the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Discover files from the link manifest.
    #[default]
    Manifest,
    /// Use the configured static file list.
    Static,
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manifest => f.write_str("manifest"),
            Self::Static => f.write_str("static"),
        }
    }
}

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pipeline used when the CLI does not pick one.
    #[serde(default)]
    pub mode: BuildMode,

    /// Output document settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Link manifest settings.
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Static file list settings.
    #[serde(default)]
    pub static_list: StaticListConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output path relative to the project root.
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Document title. Derived from the root directory name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Command quoted in the generation notice.
    #[serde(default = "default_regenerate_command")]
    pub regenerate_command: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            title: None,
            regenerate_command: default_regenerate_command(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.into()
}
fn default_regenerate_command() -> String {
    "docbundle build".into()
}

/// `[manifest]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest path relative to the project root.
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

fn default_manifest_path() -> String {
    DEFAULT_MANIFEST_PATH.into()
}

/// `[static_list]` section.
///
/// ```toml
/// [static_list]
/// files = [
///     "README.md",
///     "docs/getting-started.md",
///     "docs/architecture.md",
///     "docs/development.md",
///     "docs/installation.md",
///     "LICENSE",
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticListConfig {
    /// Files to inline, in output order.
    #[serde(default = "default_static_files")]
    pub files: Vec<String>,
}

impl Default for StaticListConfig {
    fn default() -> Self {
        Self {
            files: default_static_files(),
        }
    }
}

fn default_static_files() -> Vec<String> {
    vec!["README.md".into()]
}

// ---------------------------------------------------------------------------
// Build settings (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration for one invocation.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Project root every relative path is resolved against.
    pub root: PathBuf,
    /// Selected pipeline.
    pub mode: BuildMode,
    /// Output path relative to `root`.
    pub output_path: String,
    /// Title line of the generated document (without the leading `# `).
    pub title: String,
    /// Command quoted in the generation notice.
    pub regenerate_command: String,
    /// Manifest path relative to `root`.
    pub manifest_path: String,
    /// Static file list, in order.
    pub files: Vec<String>,
}

impl BuildSettings {
    /// Merge a loaded config with the project root.
    pub fn from_config(root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        let root = root.into();
        let title = config
            .output
            .title
            .clone()
            .unwrap_or_else(|| default_title(&root));

        Self {
            mode: config.mode,
            output_path: config.output.path.clone(),
            title,
            regenerate_command: config.output.regenerate_command.clone(),
            manifest_path: config.manifest.path.clone(),
            files: config.static_list.files.clone(),
            root,
        }
    }
}

/// `"<root dir name> (llms-full)"`, falling back to a generic name.
fn default_title(root: &Path) -> String {
    let name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "Project".into());
    format!("{name} (llms-full)")
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocBundleError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocBundleError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file at the project root.
/// Refuses to replace an existing file. Returns the path written.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(DocBundleError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocBundleError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocBundleError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
