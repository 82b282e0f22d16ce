// crates/late-core/src/state.rs
//
// Persisted record types for Late Staking.
//
// Three records exist, each stored under an address derived from a seed tag
// and its identity components:
//   - ProtocolRegistryRecord:  [REGISTRY_SEED, token]
//   - StakingPoolState:        [POOL_SEED, token]
//   - ParticipantLedgerEntry:  [PARTICIPANT_SEED, participant, token]
//
// Escrow balances are held by the address [ESCROW_SEED, token].
//
// Amounts are u64 in the token's smallest unit. Fixed-point quantities
// (reward rate and accumulator) are u128 scaled by the engine's SCALE.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Seed tag for the protocol registry record.
pub const REGISTRY_SEED: &[u8] = b"protocol_config";

/// Seed tag for the staking pool state.
pub const POOL_SEED: &[u8] = b"staking_config";

/// Seed tag for participant ledger entries.
pub const PARTICIPANT_SEED: &[u8] = b"user_info";

/// Seed tag for the pool escrow holder.
pub const ESCROW_SEED: &[u8] = b"reward_pool";

/// Precision of fee fractions (10^6).
pub const FEE_PRECISION: u64 = 1_000_000;

/// Protocol fee carried on every registry record: 5% at `FEE_PRECISION`.
/// Recorded for completeness; no operation charges it.
pub const PROTOCOL_FEE: u64 = 50_000;

/// One per reward-token identity. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRegistryRecord {
    /// Identity authorized to administer the protocol.
    pub owner: Identity,
    /// The asset this protocol instance governs.
    pub token: Identity,
    /// Identity credited with protocol fees.
    pub fee_recipient: Identity,
    /// Fee fraction at `FEE_PRECISION`.
    pub staking_fee: u64,
}

/// Per-token singleton holding the reward schedule and global accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPoolState {
    pub owner: Identity,
    pub token: Identity,
    /// Activation timestamp.
    pub period_start: u64,
    /// Timestamp at which reward accrual stops.
    pub period_end: u64,
    /// Reward budget funded at activation.
    pub total_reward: u64,
    /// Reward emitted per second, scaled by SCALE.
    pub reward_per_second: u128,
    /// Sum of all participants' staked balances.
    pub total_staked: u64,
    /// Cumulative reward per unit of stake since activation, scaled by SCALE.
    /// Never decreases.
    pub reward_per_token_stored: u128,
    /// Timestamp through which `reward_per_token_stored` is integrated.
    pub last_update_time: u64,
}

/// Per-(participant, token) staked balance and reward checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantLedgerEntry {
    pub participant: Identity,
    pub token: Identity,
    /// Principal currently staked.
    pub staked_amount: u64,
    /// Accumulator value at the last settlement of this entry.
    pub reward_per_token_paid: u128,
    /// Settled reward owed to the participant, not yet paid out.
    pub rewards_accrued: u64,
    /// Lifetime reward paid out to the participant.
    pub reward_claimed: u64,
    /// Timestamp of the last settlement.
    pub last_updated: u64,
}

impl ParticipantLedgerEntry {
    /// Fresh entry for a participant's first deposit: zero balance, zero checkpoint.
    pub fn new(participant: Identity, token: Identity) -> Self {
        Self {
            participant,
            token,
            staked_amount: 0,
            reward_per_token_paid: 0,
            rewards_accrued: 0,
            reward_claimed: 0,
            last_updated: 0,
        }
    }

    /// True when the entry holds no principal and no unpaid reward.
    /// Withdrawn entries stay allocated in this state and can be reused.
    pub fn is_empty(&self) -> bool {
        self.staked_amount == 0 && self.rewards_accrued == 0
    }
}

/// The unit the `AccountStore` persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRecord {
    Registry(ProtocolRegistryRecord),
    Pool(StakingPoolState),
    Participant(ParticipantLedgerEntry),
}

impl AccountRecord {
    /// Short stable tag for display and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AccountRecord::Registry(_) => "registry",
            AccountRecord::Pool(_) => "pool",
            AccountRecord::Participant(_) => "participant",
        }
    }

    pub fn as_registry(&self) -> Option<&ProtocolRegistryRecord> {
        match self {
            AccountRecord::Registry(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_pool(&self) -> Option<&StakingPoolState> {
        match self {
            AccountRecord::Pool(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_participant(&self) -> Option<&ParticipantLedgerEntry> {
        match self {
            AccountRecord::Participant(e) => Some(e),
            _ => None,
        }
    }
}
