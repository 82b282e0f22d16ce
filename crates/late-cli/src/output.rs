// crates/late-cli/src/output.rs
//
// Output formatting utilities for the Late Staking CLI.
// Supports table and JSON output modes, plus the row types both commands
// print.

use std::str::FromStr;

use serde::Serialize;
use tabled::{Table, Tabled};

use late_core::{AccountRecord, Address, ParticipantLedgerEntry, StakingPoolState};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// One executed scenario step.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StepRow {
    #[tabled(rename = "Time")]
    pub at: u64,
    #[tabled(rename = "Action")]
    pub action: String,
    #[tabled(rename = "Who")]
    pub who: String,
    #[tabled(rename = "Amount")]
    pub amount: u64,
    #[tabled(rename = "Result")]
    pub result: String,
}

/// Final state of one participant.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ParticipantRow {
    #[tabled(rename = "Participant")]
    pub name: String,
    #[tabled(rename = "Staked")]
    pub staked: u64,
    #[tabled(rename = "Accrued")]
    pub accrued: u64,
    #[tabled(rename = "Claimed")]
    pub claimed: u64,
    #[tabled(rename = "Wallet")]
    pub wallet: u64,
}

/// Pool summary line.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PoolRow {
    #[tabled(rename = "Start")]
    pub period_start: u64,
    #[tabled(rename = "End")]
    pub period_end: u64,
    #[tabled(rename = "Reward")]
    pub total_reward: u64,
    #[tabled(rename = "Staked")]
    pub total_staked: u64,
    #[tabled(rename = "Acc/Token")]
    pub reward_per_token_stored: String,
    #[tabled(rename = "Updated")]
    pub last_update_time: u64,
    #[tabled(rename = "Escrow")]
    pub escrow: u64,
}

impl PoolRow {
    pub fn new(pool: &StakingPoolState, escrow: u64) -> Self {
        Self {
            period_start: pool.period_start,
            period_end: pool.period_end,
            total_reward: pool.total_reward,
            total_staked: pool.total_staked,
            reward_per_token_stored: pool.reward_per_token_stored.to_string(),
            last_update_time: pool.last_update_time,
            escrow,
        }
    }
}

/// One persisted record, as listed by `inspect`.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Token")]
    pub token: String,
    #[tabled(rename = "Summary")]
    pub summary: String,
}

impl RecordRow {
    pub fn new(address: &Address, record: &AccountRecord) -> Self {
        let (token, summary) = match record {
            AccountRecord::Registry(r) => (
                r.token,
                format!(
                    "owner {} fee {} -> {}",
                    short(&r.owner.to_hex()),
                    r.staking_fee,
                    short(&r.fee_recipient.to_hex())
                ),
            ),
            AccountRecord::Pool(p) => (
                p.token,
                format!(
                    "{}..{} reward {} staked {} updated {}",
                    p.period_start, p.period_end, p.total_reward, p.total_staked, p.last_update_time
                ),
            ),
            AccountRecord::Participant(e) => (e.token, participant_summary(e)),
        };
        Self {
            address: short(&address.to_hex()),
            kind: record.kind().to_string(),
            token: short(&token.to_hex()),
            summary,
        }
    }
}

fn participant_summary(entry: &ParticipantLedgerEntry) -> String {
    format!(
        "{} staked {} accrued {} claimed {}",
        short(&entry.participant.to_hex()),
        entry.staked_amount,
        entry.rewards_accrued,
        entry.reward_claimed
    )
}

/// First 12 hex characters, enough to tell records apart on screen.
fn short(hex: &str) -> String {
    hex.chars().take(12).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use late_core::Identity;

    #[test]
    fn test_parse_output_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_record_row_for_participant() {
        let mut entry =
            ParticipantLedgerEntry::new(Identity::from_label("alice"), Identity::from_label("token"));
        entry.staked_amount = 42;
        let row = RecordRow::new(&Address([0xcd; 32]), &AccountRecord::Participant(entry));
        assert_eq!(row.kind, "participant");
        assert_eq!(row.address, "cdcdcdcdcdcd");
        assert!(row.summary.contains("staked 42"));
        assert!(format_table(&[row]).contains("participant"));
    }
}
