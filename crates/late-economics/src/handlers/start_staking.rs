// crates/late-economics/src/handlers/start_staking.rs
//
// start-staking: activate the pool for a token and fund its reward escrow.

use late_core::{AccountRecord, Identity, StakingError, StakingPoolState};

use crate::pool::activate;

use super::{HandlerContext, UnitOfWork};

/// Activate the staking pool for `token`.
///
/// The caller must be the registry owner. `reward_amount` moves from the
/// caller to the pool escrow and is emitted evenly until `period_end`.
///
/// # Errors
/// - `NotFound` if the protocol registry does not exist.
/// - `AlreadyInitialized` if the pool is already active.
/// - `Unauthorized`, `InvalidPeriod`, `InvalidAmount` from validation.
/// - `InsufficientBalance` if the owner cannot fund the budget.
pub fn start_staking(
    ctx: &HandlerContext<'_>,
    caller: Identity,
    token: Identity,
    period_end: u64,
    reward_amount: u64,
    now: u64,
) -> Result<StakingPoolState, StakingError> {
    let mut work = UnitOfWork::new(ctx.store);

    let registry = work
        .registry(&ctx.registry_address(&token))?
        .ok_or_else(|| {
            StakingError::NotFound(format!("protocol registry for token {} not initialized", token))
        })?;

    let pool_address = ctx.pool_address(&token);
    if work.exists(&pool_address)? {
        return Err(StakingError::AlreadyInitialized(format!(
            "staking pool for token {} is already active",
            token
        )));
    }

    let pool = activate(&registry, &caller, period_end, reward_amount, now)?;
    tracing::debug!(
        "Staking duration: {} seconds, reward per second (scaled): {}",
        period_end - now,
        pool.reward_per_second
    );

    work.stage(pool_address, AccountRecord::Pool(pool.clone()));
    ctx.transfer_and_commit(work, &token, &caller, &ctx.escrow(&token), reward_amount)?;

    tracing::info!(
        "Staking pool started for token {} with {} reward tokens, period {}..{}",
        token,
        reward_amount,
        pool.period_start,
        pool.period_end
    );
    Ok(pool)
}
