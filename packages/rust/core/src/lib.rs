//! Document generation for docbundle.
//!
//! This crate ties together manifest parsing, path resolution, text
//! normalization and output assembly into the two generation pipelines
//! (static file list and `llms.txt` manifest).

pub mod assembler;
pub mod normalize;
pub mod pipeline;
pub mod resolve;

pub use pipeline::{GenerateResult, LinkReport, Rendered, SkippedRef, generate};
