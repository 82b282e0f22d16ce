// crates/late-cli/src/scenario.rs
//
// Scenario files: a TOML description of one pool's life, replayed against a
// StakingProgram on a manual clock.
//
// Example:
//
//   token = "usdc"
//   owner = "owner"
//   start_time = 0
//
//   [pool]
//   period_end = 5000
//   reward = 5000000000000
//
//   [balances]
//   alice = 10000000000
//
//   [[steps]]
//   at = 0
//   action = "deposit"
//   who = "alice"
//   amount = 10000000000
//
//   [[steps]]
//   at = 5000
//   action = "withdraw"
//   who = "alice"
//
// Names are turned into identities with `Identity::from_label`. The owner is
// minted the pool reward before the pool starts, on top of any balance listed.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use late_core::{AccountStore, Identity, TokenTransfer};
use late_economics::{ManualClock, StakingProgram, TokenBank};

use crate::output::{ParticipantRow, PoolRow, StepRow};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_token")]
    pub token: String,
    pub owner: String,
    #[serde(default)]
    pub fee_recipient: Option<String>,
    #[serde(default)]
    pub start_time: u64,
    pub pool: PoolSpec,
    #[serde(default)]
    pub balances: BTreeMap<String, u64>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_token() -> String {
    "token".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolSpec {
    pub period_end: u64,
    pub reward: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub at: u64,
    pub action: StepAction,
    pub who: String,
    #[serde(default)]
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Deposit,
    Withdraw,
    /// Record the participant's pending reward without changing state.
    Pending,
}

impl StepAction {
    fn as_str(&self) -> &'static str {
        match self {
            StepAction::Deposit => "deposit",
            StepAction::Withdraw => "withdraw",
            StepAction::Pending => "pending",
        }
    }
}

/// Everything `simulate` prints.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<StepRow>,
    pub pool: PoolRow,
    pub participants: Vec<ParticipantRow>,
}

impl Scenario {
    /// Parse a scenario from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read and parse a scenario file.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(step) = self.steps.iter().find(|s| s.at < self.start_time) {
            return Err(format!(
                "step '{}' for {} at {} is before start_time {}",
                step.action.as_str(),
                step.who,
                step.at,
                self.start_time
            )
            .into());
        }
        Ok(())
    }

    /// Names of everyone who holds a balance or appears in a step, owner
    /// excluded.
    fn participants(&self) -> BTreeSet<&str> {
        self.balances
            .keys()
            .map(String::as_str)
            .chain(self.steps.iter().map(|s| s.who.as_str()))
            .filter(|name| *name != self.owner)
            .collect()
    }
}

/// Replay `scenario` against a fresh program over `store`.
///
/// `store` must be empty: balances are minted into an in-memory bank for
/// this run only, so records left by an earlier run would describe escrow
/// that no longer exists. Setup failures (protocol init, pool start,
/// minting) abort the run. Step failures are recorded in the report and the
/// run continues, so scenarios can exercise rejected operations.
pub fn run(
    scenario: &Scenario,
    store: Arc<dyn AccountStore>,
) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let existing = store.records()?.len();
    if existing > 0 {
        return Err(format!(
            "account store already holds {} records from an earlier run; simulate needs an empty database",
            existing
        )
        .into());
    }

    let bank = Arc::new(TokenBank::new());
    let clock = Arc::new(ManualClock::new(scenario.start_time));
    let program = StakingProgram::new(store, bank.clone()).with_clock(clock.clone());

    let token = Identity::from_label(&scenario.token);
    let owner = Identity::from_label(&scenario.owner);
    let fee_recipient = scenario.fee_recipient.as_deref().map(Identity::from_label);

    for (name, amount) in &scenario.balances {
        bank.mint(&token, &Identity::from_label(name), *amount)?;
    }
    bank.mint(&token, &owner, scenario.pool.reward)?;

    program.initialize_protocol(owner, token, fee_recipient)?;
    program.start_staking(owner, token, scenario.pool.period_end, scenario.pool.reward)?;
    tracing::info!(
        "Scenario pool started at {} for token '{}' ({} reward until {})",
        scenario.start_time,
        scenario.token,
        scenario.pool.reward,
        scenario.pool.period_end
    );

    let mut steps = scenario.steps.clone();
    steps.sort_by_key(|s| s.at);

    let mut rows = Vec::with_capacity(steps.len());
    for step in &steps {
        clock.set(step.at);
        let who = Identity::from_label(&step.who);
        let outcome = match step.action {
            StepAction::Deposit => program
                .deposit(who, token, step.amount)
                .map(|entry| format!("ok, staked {}", entry.staked_amount)),
            StepAction::Withdraw => program.withdraw(who, token).map(|receipt| {
                format!(
                    "ok, principal {} reward {}",
                    receipt.payout.principal, receipt.payout.reward
                )
            }),
            StepAction::Pending => program
                .pending_rewards(&who, &token)
                .map(|pending| format!("pending {}", pending)),
        };
        let result = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(
                    "Step {} for {} at {} rejected: {}",
                    step.action.as_str(),
                    step.who,
                    step.at,
                    e
                );
                format!("rejected: {}", e)
            }
        };
        rows.push(StepRow {
            at: step.at,
            action: step.action.as_str().to_string(),
            who: step.who.clone(),
            amount: step.amount,
            result,
        });
    }

    let pool = program
        .pool(&token)?
        .ok_or("pool disappeared after start_staking")?;
    let pool_row = PoolRow::new(&pool, program.escrow_balance(&token));

    let mut participants = Vec::new();
    for name in scenario.participants() {
        let id = Identity::from_label(name);
        let entry = program.participant(&id, &token)?;
        participants.push(ParticipantRow {
            name: name.to_string(),
            staked: entry.as_ref().map_or(0, |e| e.staked_amount),
            accrued: entry.as_ref().map_or(0, |e| e.rewards_accrued),
            claimed: entry.as_ref().map_or(0, |e| e.reward_claimed),
            wallet: bank.balance(&token, &id),
        });
    }

    Ok(SimulationReport {
        steps: rows,
        pool: pool_row,
        participants,
    })
}
