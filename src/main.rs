//! # integration-validator CLI entry point
//!
//! Finds manifest files with a glob, validates each one against the
//! integration schema, and reports per-file results. Exits non-zero when any
//! manifest fails.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use integration_manifest::discover::{DiscoverOptions, discover};
use integration_manifest::report::{ReportFormat, any_failed, check_files, render_json, render_text};

/// Checks integration manifests against the Integration schema.
#[derive(Parser, Debug)]
#[command(name = "integration-validator", version, about, long_about = None)]
struct Cli {
    /// File name glob of the manifests to load (.json, .yaml or .yml).
    #[arg(long, default_value = "*.json")]
    manifest: String,

    /// Directory to load the manifests from.
    #[arg(long, default_value = "manifests")]
    manifest_dir: PathBuf,

    /// Search subdirectories of the manifest directory as well.
    #[arg(short, long)]
    recursive: bool,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Validate files one at a time instead of in parallel.
    #[arg(long)]
    sequential: bool,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns exit code: 0 when every manifest passed, 1 when any failed or the
/// pattern was rejected.
fn run(cli: &Cli) -> Result<u8> {
    let options = DiscoverOptions {
        dir: cli.manifest_dir.clone(),
        pattern: cli.manifest.clone(),
        recursive: cli.recursive,
    };

    tracing::info!(
        dir = %options.dir.display(),
        pattern = %options.pattern,
        recursive = options.recursive,
        "loading manifests"
    );

    let paths = match discover(&options) {
        Ok(paths) => paths,
        Err(e) if e.chain().any(|cause| cause.is::<glob::PatternError>()) => return Err(e),
        Err(e) => {
            tracing::error!("{e:#}");
            return Ok(1);
        }
    };

    if paths.is_empty() {
        tracing::warn!(dir = %options.dir.display(), "no manifests matched");
    }

    let reports = check_files(&paths, !cli.sequential);

    match cli.format {
        ReportFormat::Text => print!("{}", render_text(&reports)),
        ReportFormat::Json => {
            println!("{}", render_json(&reports).context("failed to render JSON report")?)
        }
    }

    Ok(if any_failed(&reports) { 1 } else { 0 })
}
