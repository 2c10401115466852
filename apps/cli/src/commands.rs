//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docbundle_core::pipeline::{generate, inspect_manifest};
use docbundle_shared::{AppConfig, BuildMode, BuildSettings, init_config, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docbundle — bundle project docs into one offline-readable file.
#[derive(Parser)]
#[command(
    name = "docbundle",
    version,
    about = "Concatenate project documentation into a single llms-full.txt.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Pipeline selector.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum ModeArg {
    /// Inline the files linked from the manifest.
    Manifest,
    /// Inline the configured static file list.
    Static,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Manifest => Self::Manifest,
            ModeArg::Static => Self::Static,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Regenerate the output document.
    Build {
        /// Project root (defaults to the current directory).
        #[arg(long, env = "DOCBUNDLE_ROOT", default_value = ".")]
        root: PathBuf,

        /// Pipeline to run (overrides `mode` in docbundle.toml).
        #[arg(short, long)]
        mode: Option<ModeArg>,

        /// Output path relative to the root (overrides `[output].path`).
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Show the links found in the manifest and whether each is inlined.
    Links {
        /// Project root (defaults to the current directory).
        #[arg(long, env = "DOCBUNDLE_ROOT", default_value = ".")]
        root: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Project root (defaults to the current directory).
        #[arg(long, env = "DOCBUNDLE_ROOT", default_value = ".", global = true)]
        root: PathBuf,

        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write docbundle.toml with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docbundle=info",
        1 => "docbundle=debug",
        _ => "docbundle=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build { root, mode, out } => cmd_build(&root, mode, out),
        Command::Links { root, json } => cmd_links(&root, json),
        Command::Config { root, action } => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&root),
        },
    }
}

/// Load config for `root` and apply CLI overrides.
fn resolve_settings(
    root: &Path,
    mode: Option<ModeArg>,
    out: Option<String>,
) -> Result<BuildSettings> {
    if !root.is_dir() {
        return Err(eyre!("project root '{}' is not a directory", root.display()));
    }

    let config = load_config(root)?;
    let mut settings = BuildSettings::from_config(root, &config);

    if let Some(mode) = mode {
        settings.mode = mode.into();
    }
    if let Some(out) = out {
        settings.output_path = out;
    }
    Ok(settings)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(root: &Path, mode: Option<ModeArg>, out: Option<String>) -> Result<()> {
    let settings = resolve_settings(root, mode, out)?;

    info!(
        root = %settings.root.display(),
        mode = %settings.mode,
        output = %settings.output_path,
        "regenerating documentation bundle"
    );

    let result = generate(&settings)?;

    println!();
    println!("  Documentation bundle written!");
    println!("  Path:    {}", result.output_path.display());
    println!("  Mode:    {}", result.mode);
    println!("  Blocks:  {}", result.blocks);
    println!("  Skipped: {}", result.skipped.len());
    println!("  Bytes:   {}", result.bytes);
    println!("  SHA-256: {}", result.sha256);
    println!();

    Ok(())
}

fn cmd_links(root: &Path, json: bool) -> Result<()> {
    let settings = resolve_settings(root, Some(ModeArg::Manifest), None)?;
    let reports = inspect_manifest(&settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        let status = match report.skipped {
            Some(reason) => format!("skip ({reason})"),
            None => "include".to_string(),
        };
        let optional = if report.optional { " [optional]" } else { "" };
        println!(
            "  {status:<20} {}{optional}  (section: {})",
            report.path, report.section
        );
    }
    let included = reports.iter().filter(|r| r.skipped.is_none()).count();
    println!();
    println!("  {included} of {} links inlined", reports.len());

    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path) -> Result<()> {
    let config: AppConfig = load_config(root)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_flags() {
        let cli = Cli::try_parse_from([
            "docbundle", "-vv", "build", "--root", "/tmp/p", "--mode", "static", "--out", "x.txt",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Build { root, mode, out } => {
                assert_eq!(root, PathBuf::from("/tmp/p"));
                assert!(matches!(mode, Some(ModeArg::Static)));
                assert_eq!(out.as_deref(), Some("x.txt"));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("docbundle.toml"),
            "mode = \"manifest\"\n\n[output]\npath = \"from-config.txt\"\n",
        )
        .unwrap();

        let settings = resolve_settings(tmp.path(), None, None).unwrap();
        assert_eq!(settings.mode, BuildMode::Manifest);
        assert_eq!(settings.output_path, "from-config.txt");

        let settings =
            resolve_settings(tmp.path(), Some(ModeArg::Static), Some("cli.txt".into())).unwrap();
        assert_eq!(settings.mode, BuildMode::Static);
        assert_eq!(settings.output_path, "cli.txt");
    }

    #[test]
    fn links_and_config_show_run_on_a_project() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("llms.txt"),
            "## Docs\n- [A](a.md)\n- [Up](../up.md)\n",
        )
        .unwrap();
        std::fs::write(tmp.path().join("a.md"), "A").unwrap();

        cmd_links(tmp.path(), false).unwrap();
        cmd_links(tmp.path(), true).unwrap();
        cmd_config_show(tmp.path()).unwrap();
    }

    #[test]
    fn links_requires_a_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let err = cmd_links(tmp.path(), true).unwrap_err();
        assert!(err.to_string().contains("manifest not found"));
    }

    #[test]
    fn missing_root_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(resolve_settings(&tmp.path().join("absent"), None, None).is_err());
    }
}
