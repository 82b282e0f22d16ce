// crates/late-cli/src/commands/inspect.rs
//
// `late-staking inspect`: list the records persisted in a RocksDB account
// store, optionally filtered to one token.

use clap::Args;
use serde::Serialize;

use late_core::{AccountRecord, AccountStore, Identity};
use late_store::RocksStore;

use crate::config::{expand_tilde, CliConfig};
use crate::output::{format_json, format_table, OutputFormat, RecordRow};

#[derive(Debug, Args)]
pub struct InspectCmd {
    /// RocksDB path. Defaults to the configured data directory.
    #[arg(long)]
    pub db: Option<String>,

    /// Only show records for this token name.
    #[arg(long)]
    pub token: Option<String>,

    /// Output format: table or json. Defaults to the configured format.
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

/// Run the inspect subcommand.
pub fn run(cmd: &InspectCmd, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = match &cmd.db {
        Some(db) => expand_tilde(db),
        None => config.data_path(),
    };
    if !path.exists() {
        return Err(format!("no account store at {}", path.display()).into());
    }
    let store = RocksStore::open(&path.to_string_lossy())?;

    let token = cmd.token.as_deref().map(Identity::from_label);
    let records: Vec<_> = store
        .records()?
        .into_iter()
        .filter(|(_, record)| token.map_or(true, |t| record_token(record) == t))
        .collect();

    let format = match cmd.format {
        Some(format) => format,
        None => config.output_format()?,
    };
    match format {
        OutputFormat::Json => {
            let json: Vec<RecordJson<'_>> = records
                .iter()
                .map(|(address, record)| RecordJson {
                    address: address.to_hex(),
                    record,
                })
                .collect();
            println!("{}", format_json(&json));
        }
        OutputFormat::Table => {
            let rows: Vec<RecordRow> = records
                .iter()
                .map(|(address, record)| RecordRow::new(address, record))
                .collect();
            println!("{} record(s) in {}", rows.len(), path.display());
            println!("{}", format_table(&rows));
        }
    }

    Ok(())
}

/// JSON shape of one record. Serialized straight to text so u128 fields
/// survive.
#[derive(Serialize)]
struct RecordJson<'a> {
    address: String,
    record: &'a AccountRecord,
}

fn record_token(record: &AccountRecord) -> Identity {
    match record {
        AccountRecord::Registry(r) => r.token,
        AccountRecord::Pool(p) => p.token,
        AccountRecord::Participant(e) => e.token,
    }
}
