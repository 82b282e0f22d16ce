// crates/late-cli/src/commands/simulate.rs
//
// `late-staking simulate <scenario>`: replay a scenario file and print the
// step log, the final pool, and each participant's balances.
//
// Token balances live only for the run, so each simulation needs an empty
// account store. With the rocksdb backend and no --db, every run gets its own
// directory under data_dir.

use std::sync::Arc;

use clap::Args;

use late_core::AccountStore;
use late_store::{MemoryStore, RocksStore};
use uuid::Uuid;

use crate::config::{expand_tilde, CliConfig};
use crate::output::{format_json, format_table, OutputFormat};
use crate::scenario::Scenario;

#[derive(Debug, Args)]
pub struct SimulateCmd {
    /// Path to the scenario TOML file.
    pub scenario: String,

    /// Persist records to a new RocksDB database at this path instead of the
    /// configured backend. The path must not hold an earlier run.
    #[arg(long)]
    pub db: Option<String>,

    /// Output format: table or json. Defaults to the configured format.
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

/// Run the simulate subcommand.
pub fn run(cmd: &SimulateCmd, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(&cmd.scenario)?;
    let store = open_store(cmd.db.as_deref(), config)?;
    let report = crate::scenario::run(&scenario, store)?;

    let format = match cmd.format {
        Some(format) => format,
        None => config.output_format()?,
    };
    match format {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => {
            println!("Steps");
            println!("{}", format_table(&report.steps));
            println!();
            println!("Pool");
            println!("{}", format_table(std::slice::from_ref(&report.pool)));
            println!();
            println!("Participants");
            println!("{}", format_table(&report.participants));
        }
    }

    Ok(())
}

fn open_store(
    db: Option<&str>,
    config: &CliConfig,
) -> Result<Arc<dyn AccountStore>, Box<dyn std::error::Error>> {
    let rocks_path = match (db, config.backend.as_str()) {
        (Some(path), _) => expand_tilde(path),
        (None, "rocksdb") => config.data_path().join(format!("run-{}", Uuid::now_v7())),
        (None, "memory") => return Ok(Arc::new(MemoryStore::new())),
        (None, other) => {
            return Err(format!("unknown backend '{}' (expected memory or rocksdb)", other).into())
        }
    };

    std::fs::create_dir_all(&rocks_path)?;
    let path = rocks_path.to_string_lossy();
    tracing::info!("Opening RocksDB account store at {}", path);
    Ok(Arc::new(RocksStore::open(&path)?))
}
