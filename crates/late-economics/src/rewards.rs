// crates/late-economics/src/rewards.rs
//
// The reward engine: O(1) time-weighted accrual, independent of how many
// participants the pool has.
//
// The pool carries a global accumulator, reward_per_token_stored, equal to
// the reward one unit of stake would have earned since activation (scaled by
// SCALE). Each ledger entry carries a checkpoint of that accumulator taken at
// its last settlement. What an entry is owed is its (constant since that
// checkpoint) balance times the accumulator delta.
//
// Ordering rules every mutating operation follows:
//   1. settle_global(pool, now)          before total_staked changes
//   2. settle_participant(pool, entry)   before entry.staked_amount changes
//
// The reward rate is stored pre-scaled, so the accumulator increment is
// elapsed * reward_per_second / total_staked, already in SCALE units.
//
// Zero-stake policy: last_update_time advances even while total_staked is 0.
// Reward for an interval with no stakers is forfeited to the escrow, never
// credited retroactively to whoever stakes next.

use late_core::{ParticipantLedgerEntry, StakingError, StakingPoolState};

use crate::math::{add_amount, mul_div, to_amount, SCALE};

/// Fixed-point reward rate for a budget spread evenly over `duration` seconds.
pub fn reward_rate(total_reward: u64, duration: u64) -> Result<u128, StakingError> {
    mul_div(total_reward as u128, SCALE, duration as u128, "reward_per_second")
}

/// Bring the pool accumulator up to `min(now, period_end)`.
///
/// A `now` at or before `last_update_time` is a no-op, so neither the
/// accumulator nor `last_update_time` ever moves backwards.
pub fn settle_global(pool: &mut StakingPoolState, now: u64) -> Result<(), StakingError> {
    let effective = now.min(pool.period_end);
    if effective <= pool.last_update_time {
        return Ok(());
    }

    if pool.total_staked > 0 {
        let elapsed = (effective - pool.last_update_time) as u128;
        let increment = mul_div(
            elapsed,
            pool.reward_per_second,
            pool.total_staked as u128,
            "reward_per_token increment",
        )?;
        pool.reward_per_token_stored = pool
            .reward_per_token_stored
            .checked_add(increment)
            .ok_or(StakingError::ArithmeticOverflow("reward_per_token_stored"))?;
    }

    pool.last_update_time = effective;
    Ok(())
}

/// Credit an entry with everything its current balance earned since its
/// last checkpoint, then move the checkpoint to the pool accumulator.
///
/// Must follow `settle_global` and precede any change to `staked_amount`.
/// Returns the amount credited by this settlement.
pub fn settle_participant(
    pool: &StakingPoolState,
    entry: &mut ParticipantLedgerEntry,
    now: u64,
) -> Result<u64, StakingError> {
    let delta = pool
        .reward_per_token_stored
        .checked_sub(entry.reward_per_token_paid)
        .ok_or_else(|| {
            StakingError::Internal(format!(
                "checkpoint {} ahead of accumulator {} for {}",
                entry.reward_per_token_paid, pool.reward_per_token_stored, entry.participant
            ))
        })?;

    let owed = to_amount(
        mul_div(entry.staked_amount as u128, delta, SCALE, "participant reward")?,
        "participant reward",
    )?;

    entry.rewards_accrued = add_amount(entry.rewards_accrued, owed, "rewards_accrued")?;
    entry.reward_per_token_paid = pool.reward_per_token_stored;
    entry.last_updated = now;
    Ok(owed)
}

/// Reward an entry would hold if it were settled at `now`, without mutating
/// anything.
pub fn pending_rewards(
    pool: &StakingPoolState,
    entry: &ParticipantLedgerEntry,
    now: u64,
) -> Result<u64, StakingError> {
    let mut pool = pool.clone();
    let mut entry = entry.clone();
    settle_global(&mut pool, now)?;
    settle_participant(&pool, &mut entry, now)?;
    Ok(entry.rewards_accrued)
}
