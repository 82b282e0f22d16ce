// crates/late-economics/src/ledger.rs
//
// Balance changes on a participant ledger entry and the matching pool total.
//
// Both functions assume the caller already ran settle_global and
// settle_participant at the current time; they only move principal.

use serde::{Deserialize, Serialize};

use late_core::{ParticipantLedgerEntry, StakingError, StakingPoolState};

use crate::math::{add_amount, sub_amount};

/// What a full withdrawal pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Principal returned.
    pub principal: u64,
    /// Settled reward paid.
    pub reward: u64,
}

impl Payout {
    pub fn total(&self) -> Result<u64, StakingError> {
        add_amount(self.principal, self.reward, "payout")
    }
}

/// Add `amount` to the entry and the pool total.
pub fn apply_deposit(
    pool: &mut StakingPoolState,
    entry: &mut ParticipantLedgerEntry,
    amount: u64,
) -> Result<(), StakingError> {
    if amount == 0 {
        return Err(StakingError::InvalidAmount(
            "deposit amount must be greater than zero".to_string(),
        ));
    }
    entry.staked_amount = add_amount(entry.staked_amount, amount, "staked_amount")?;
    pool.total_staked = add_amount(pool.total_staked, amount, "total_staked")?;
    Ok(())
}

/// Empty the entry: principal and accrued reward leave together.
///
/// The checkpoint stays at the current accumulator so a later deposit into
/// the same entry starts clean.
pub fn apply_withdraw(
    pool: &mut StakingPoolState,
    entry: &mut ParticipantLedgerEntry,
) -> Result<Payout, StakingError> {
    if entry.staked_amount == 0 {
        return Err(StakingError::NotFound(format!(
            "no active stake for {} in token {}",
            entry.participant, entry.token
        )));
    }

    let payout = Payout {
        principal: entry.staked_amount,
        reward: entry.rewards_accrued,
    };
    payout.total()?;

    pool.total_staked = pool
        .total_staked
        .checked_sub(payout.principal)
        .ok_or_else(|| {
            StakingError::Internal(format!(
                "pool total {} below withdrawing stake {}",
                pool.total_staked, payout.principal
            ))
        })?;
    entry.reward_claimed = add_amount(entry.reward_claimed, payout.reward, "reward_claimed")?;
    entry.staked_amount = sub_amount(entry.staked_amount, payout.principal, "staked_amount")?;
    entry.rewards_accrued = 0;
    entry.reward_per_token_paid = pool.reward_per_token_stored;
    Ok(payout)
}
