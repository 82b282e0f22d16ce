// crates/late-economics/src/pool.rs
//
// Staking pool activation and period checks.
//
// A pool is activated once per token by the registry owner. Activation fixes
// the reward schedule: the funded budget is spread evenly over
// [period_start, period_end), where period_start is the activation time.

use late_core::{Identity, ProtocolRegistryRecord, StakingError, StakingPoolState};

use crate::registry::ensure_owner;
use crate::rewards::reward_rate;

/// Validate an activation request and build the initial pool state.
///
/// Checks, in order: caller owns the registry, `period_end` is strictly in
/// the future, the budget is non-zero, and the rate fits. Nothing here
/// touches balances, so every rejection happens before any transfer.
pub fn activate(
    registry: &ProtocolRegistryRecord,
    caller: &Identity,
    period_end: u64,
    reward_amount: u64,
    now: u64,
) -> Result<StakingPoolState, StakingError> {
    ensure_owner(registry, caller)?;

    if period_end <= now {
        return Err(StakingError::InvalidPeriod { period_end, now });
    }
    if reward_amount == 0 {
        return Err(StakingError::InvalidAmount(
            "reward amount must be greater than zero".to_string(),
        ));
    }

    let reward_per_second = reward_rate(reward_amount, period_end - now)?;

    Ok(StakingPoolState {
        owner: registry.owner,
        token: registry.token,
        period_start: now,
        period_end,
        total_reward: reward_amount,
        reward_per_second,
        total_staked: 0,
        reward_per_token_stored: 0,
        last_update_time: now,
    })
}

/// Reject deposits once the reward period has closed.
pub fn ensure_accepting_deposits(pool: &StakingPoolState, now: u64) -> Result<(), StakingError> {
    if now > pool.period_end {
        return Err(StakingError::StakingPeriodEnded {
            period_end: pool.period_end,
            now,
        });
    }
    Ok(())
}

/// Seconds of accrual left at `now`.
pub fn remaining_seconds(pool: &StakingPoolState, now: u64) -> u64 {
    pool.period_end.saturating_sub(now.max(pool.period_start))
}
