// crates/late-cli/src/main.rs
//
// CLI entrypoint for the Late Staking developer tools.
//
// Provides subcommands for replaying staking scenarios against the reward
// engine and inspecting persisted account records.

mod commands;
mod config;
mod output;
mod scenario;

use clap::{Parser, Subcommand};
use commands::inspect::InspectCmd;
use commands::simulate::SimulateCmd;
use config::CliConfig;

/// Late Staking CLI: time-weighted reward pool tools.
#[derive(Parser, Debug)]
#[command(
    name = "late-staking",
    version = "0.1.0",
    about = "Late Staking CLI: simulate and inspect time-weighted staking pools"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.late-staking/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a scenario file against a fresh pool.
    Simulate(SimulateCmd),

    /// List records persisted in a RocksDB account store.
    Inspect(InspectCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = CliConfig::load_or_default(&cli.config)?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Simulate(cmd) => commands::simulate::run(cmd, &config)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd, &config)?,
    }

    Ok(())
}
