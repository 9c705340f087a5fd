//! event-transform CLI - runs NDJSON events through the customer/order transform
//!
//! Reads one event per line, writes every resulting event (fan-out included) in order.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use event_transform::runner::{OutputFormat, RunStats, Runner, RunnerConfig};
use event_transform::Transformer;

#[derive(Parser)]
#[command(name = "event-transform")]
#[command(version, about = "Derive fields and fan out order events from an NDJSON event stream", long_about = None)]
struct Cli {
    /// Input NDJSON file (default: stdin, `-` also reads stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output encoding
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Skip input lines that are not valid events instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// Optional YAML config file with the same keys
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Resolve config with precedence: CLI > ENV > config file > default
fn resolve_config(cli: Cli) -> Result<RunnerConfig, String> {
    let base = match &cli.config {
        Some(path) => RunnerConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => RunnerConfig::default(),
    };

    let mut config = base.with_env().map_err(|e| e.to_string())?;

    if cli.input.is_some() {
        config.input = cli.input;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.skip_invalid {
        config.skip_invalid = true;
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<RunStats, String> {
    let config = resolve_config(cli)?;
    tracing::debug!(?config, "Resolved configuration");

    Runner::new(config, Transformer::new())
        .run_configured()
        .map_err(|e| e.to_string())
}

fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries the event stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
