//! Shared types, error model, and configuration for docbundle.
//!
//! This crate is the foundation depended on by all other docbundle crates.
//! It provides:
//! - [`DocBundleError`] — the unified error type
//! - Domain types ([`FileRef`], [`ManifestEntry`])
//! - Configuration ([`AppConfig`], [`BuildSettings`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildMode, BuildSettings, CONFIG_FILE_NAME, DEFAULT_MANIFEST_PATH,
    DEFAULT_OUTPUT_PATH, ManifestConfig, OutputConfig, StaticListConfig, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{DocBundleError, Result};
pub use types::{FileRef, ManifestEntry, normalize_ref_path};
