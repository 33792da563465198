//! Health report binary
//!
//! Evaluates a snapshot of Gloo instances exported from the API server and
//! prints the same health and issue information the console shows.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console_health::{ConsoleConfig, HealthReport, OutputFormat, SnapshotCollector};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "health-report",
    version,
    about = "Summarize Gloo instance health from an API server snapshot",
    long_about = "Summarize Gloo instance health from an API server snapshot.\n\nConfiguration precedence: CLI > config file > defaults."
)]
struct Cli {
    /// Snapshot file (JSON)
    snapshot: PathBuf,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Prefix for console links
    #[arg(long)]
    route_prefix: Option<String>,

    /// Exit non-zero when any instance is rejected
    #[arg(long, action = clap::ArgAction::SetTrue)]
    fail_on_rejected: bool,
}

/// Merge CLI flags over the file configuration (CLI > config file > defaults)
fn resolve(cli: &Cli, file: Option<ConsoleConfig>) -> ConsoleConfig {
    let mut config = file.unwrap_or_default();
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(prefix) = &cli.route_prefix {
        config.route_prefix = prefix.clone();
    }
    config.fail_on_rejected |= cli.fail_on_rejected;
    config
}

fn should_fail(report: &HealthReport, config: &ConsoleConfig) -> bool {
    config.fail_on_rejected && report.is_rejected()
}

fn exit_code(report: &HealthReport, config: &ConsoleConfig) -> ExitCode {
    if should_fail(report, config) {
        tracing::warn!("at least one instance is rejected");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => Some(
            ConsoleConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
        ),
        None => None,
    };
    let config = resolve(&cli, file);

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let instances = SnapshotCollector::new()
        .load(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?;

    let report = HealthReport::evaluate(&instances, &config.route_prefix);
    match config.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(exit_code(&report, &config))
}
