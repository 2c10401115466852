//! docbundle CLI — regenerate `llms-full.txt` from project documentation.
//!
//! Concatenates a configured file list, or every local file linked from
//! `llms.txt`, into one offline-readable document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
