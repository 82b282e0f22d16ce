// crates/late-economics/src/handlers/deposit.rs
//
// deposit: settle the caller, then add to their stake.

use late_core::{AccountRecord, Identity, ParticipantLedgerEntry, StakingError};

use crate::ledger::apply_deposit;
use crate::pool::ensure_accepting_deposits;
use crate::rewards::{settle_global, settle_participant};

use super::{require_pool, HandlerContext, UnitOfWork};

/// Stake `amount` of `token` for `participant`.
///
/// Reward earned on the participant's prior balance up to `now` (capped at
/// the period end) is settled into `rewards_accrued` first; the new amount
/// earns from `now` onwards. The ledger entry is created on first deposit.
///
/// Returns the updated ledger entry.
///
/// # Errors
/// - `InvalidAmount` for a zero amount.
/// - `NotFound` if the pool is not active.
/// - `StakingPeriodEnded` once `now` is past the period end.
/// - `InsufficientBalance` if the participant cannot cover `amount`.
/// - `ArithmeticOverflow` from any accumulator or balance update.
pub fn deposit(
    ctx: &HandlerContext<'_>,
    participant: Identity,
    token: Identity,
    amount: u64,
    now: u64,
) -> Result<ParticipantLedgerEntry, StakingError> {
    if amount == 0 {
        return Err(StakingError::InvalidAmount(
            "deposit amount must be greater than zero".to_string(),
        ));
    }

    let mut work = UnitOfWork::new(ctx.store);
    let (pool_address, mut pool) = require_pool(ctx, &work, &token)?;
    ensure_accepting_deposits(&pool, now)?;

    let entry_address = ctx.participant_address(&participant, &token);
    let mut entry = work
        .participant(&entry_address)?
        .unwrap_or_else(|| ParticipantLedgerEntry::new(participant, token));
    let staked_before = entry.staked_amount;

    settle_global(&mut pool, now)?;
    let owed = settle_participant(&pool, &mut entry, now)?;
    tracing::debug!(
        "Settled {}: staked before {}, credited {}, accumulator {}",
        participant,
        staked_before,
        owed,
        pool.reward_per_token_stored
    );

    apply_deposit(&mut pool, &mut entry, amount)?;

    work.stage(pool_address, AccountRecord::Pool(pool.clone()));
    work.stage(entry_address, AccountRecord::Participant(entry.clone()));
    ctx.transfer_and_commit(work, &token, &participant, &ctx.escrow(&token), amount)?;

    tracing::info!(
        "Deposit of {} by {} into token {} pool (stake {} -> {}, pool total {})",
        amount,
        participant,
        token,
        staked_before,
        entry.staked_amount,
        pool.total_staked
    );
    Ok(entry)
}
