//! Photosynth CLI - Photosynthesis bot
//!
//! Reads the board and then one block per turn on stdin, writes one move
//! per turn on stdout. Logs go to stderr so stdout stays the protocol channel.

mod protocol;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use photosynth_core::{Heuristics, UtilityAgent};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photosynth")]
#[command(about = "Utility-driven Photosynthesis bot speaking the line protocol on stdin/stdout")]
struct Cli {
    /// JSON file overriding the default heuristics (missing fields keep defaults)
    #[arg(long, value_name = "FILE")]
    heuristics: Option<PathBuf>,

    /// Print the effective heuristics as JSON and exit
    #[arg(long)]
    dump_heuristics: bool,

    /// Log filter, e.g. "debug" or "photosynth_core=trace" (default: RUST_LOG, then info)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn init_logging(log_level: Option<&str>) -> anyhow::Result<()> {
    let filter = match log_level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {:?}", directives))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let heuristics = match &cli.heuristics {
        Some(path) => {
            let heuristics = Heuristics::load(path)
                .with_context(|| format!("loading heuristics from {}", path.display()))?;
            tracing::info!("Loaded heuristics from {}", path.display());
            heuristics
        }
        None => Heuristics::default(),
    };

    if cli.dump_heuristics {
        println!("{}", serde_json::to_string_pretty(&heuristics)?);
        return Ok(());
    }

    let agent = UtilityAgent::new(heuristics);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let turns = protocol::run(stdin.lock(), stdout.lock(), &agent)?;
    tracing::info!("Input closed after {} turns", turns);

    Ok(())
}
