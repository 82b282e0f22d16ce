// crates/late-economics/src/handlers/withdraw.rs
//
// withdraw: settle the caller, then pay out principal and reward in full.

use serde::{Deserialize, Serialize};

use late_core::{AccountRecord, Identity, ParticipantLedgerEntry, StakingError};

use crate::ledger::{apply_withdraw, Payout};
use crate::rewards::{settle_global, settle_participant};

use super::{require_pool, HandlerContext, UnitOfWork};

/// Result of a successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    pub payout: Payout,
    /// The emptied ledger entry as committed.
    pub entry: ParticipantLedgerEntry,
}

/// Withdraw everything `participant` has staked in `token`, plus all
/// settled reward.
///
/// # Errors
/// - `NotFound` if the pool is not active or the participant has no stake.
/// - `EscrowShortfall` if escrow cannot cover the payout. This means the
///   accounting is broken; the payout is never clamped.
/// - `ArithmeticOverflow` from any accumulator or balance update.
pub fn withdraw(
    ctx: &HandlerContext<'_>,
    participant: Identity,
    token: Identity,
    now: u64,
) -> Result<WithdrawReceipt, StakingError> {
    let mut work = UnitOfWork::new(ctx.store);
    let (pool_address, mut pool) = require_pool(ctx, &work, &token)?;

    let entry_address = ctx.participant_address(&participant, &token);
    let mut entry = work.participant(&entry_address)?.ok_or_else(|| {
        StakingError::NotFound(format!("no ledger entry for {} in token {}", participant, token))
    })?;

    settle_global(&mut pool, now)?;
    settle_participant(&pool, &mut entry, now)?;
    let payout = apply_withdraw(&mut pool, &mut entry)?;
    let total = payout.total()?;

    let escrow = ctx.escrow(&token);
    let available = ctx.bank.balance(&token, &escrow);
    if available < total {
        tracing::error!(
            "Escrow shortfall for token {}: payout {} to {} exceeds escrow {}",
            token,
            total,
            participant,
            available
        );
        return Err(StakingError::EscrowShortfall {
            required: total,
            available,
        });
    }

    work.stage(pool_address, AccountRecord::Pool(pool.clone()));
    work.stage(entry_address, AccountRecord::Participant(entry.clone()));
    ctx.transfer_and_commit(work, &token, &escrow, &participant, total)?;

    tracing::info!(
        "Withdrawal by {} from token {} pool: principal {}, reward {} (pool total {})",
        participant,
        token,
        payout.principal,
        payout.reward,
        pool.total_staked
    );
    Ok(WithdrawReceipt { payout, entry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::deposit::deposit;
    use crate::handlers::init_protocol::init_protocol;
    use crate::handlers::start_staking::start_staking;
    use crate::handlers::test_support::Harness;
    use late_core::TokenTransfer;

    const REWARD: u64 = 5_000_000_000_000;
    const STAKE: u64 = 10_000_000_000;

    fn setup(h: &Harness, stakers: &[&str]) -> Identity {
        let ctx = h.ctx();
        let owner = Identity::from_label("owner");
        let token = Identity::from_label("token");
        init_protocol(&ctx, owner, token, None).unwrap();
        h.bank.mint(&token, &owner, REWARD).unwrap();
        start_staking(&ctx, owner, token, 5_000, REWARD, 0).unwrap();
        for label in stakers {
            h.bank.mint(&token, &Identity::from_label(label), STAKE).unwrap();
        }
        token
    }

    #[test]
    fn test_sole_staker_withdraws_principal_and_full_reward() {
        let h = Harness::default();
        let token = setup(&h, &["alice"]);
        let alice = Identity::from_label("alice");
        deposit(&h.ctx(), alice, token, STAKE, 0).unwrap();

        let receipt = withdraw(&h.ctx(), alice, token, 5_000).unwrap();
        assert_eq!(receipt.payout.principal, STAKE);
        assert_eq!(receipt.payout.reward, REWARD);
        assert_eq!(h.bank.balance(&token, &alice), STAKE + REWARD);
        assert_eq!(h.bank.balance(&token, &h.ctx().escrow(&token)), 0);
        assert!(receipt.entry.is_empty());
        assert_eq!(receipt.entry.reward_claimed, REWARD);
    }

    #[test]
    fn test_withdraw_without_entry() {
        let h = Harness::default();
        let token = setup(&h, &[]);
        let err = withdraw(&h.ctx(), Identity::from_label("alice"), token, 10).unwrap_err();
        assert!(matches!(err, StakingError::NotFound(_)));
    }

    #[test]
    fn test_second_withdraw_rejected() {
        let h = Harness::default();
        let token = setup(&h, &["alice"]);
        let alice = Identity::from_label("alice");
        deposit(&h.ctx(), alice, token, STAKE, 0).unwrap();
        withdraw(&h.ctx(), alice, token, 100).unwrap();

        let err = withdraw(&h.ctx(), alice, token, 200).unwrap_err();
        assert!(matches!(err, StakingError::NotFound(_)));
    }

    #[test]
    fn test_entry_reused_after_withdraw() {
        let h = Harness::default();
        let token = setup(&h, &["alice"]);
        let alice = Identity::from_label("alice");
        deposit(&h.ctx(), alice, token, STAKE, 0).unwrap();
        let first = withdraw(&h.ctx(), alice, token, 1_000).unwrap();
        assert_eq!(first.payout.reward, REWARD / 5);

        // Redeposit principal; the idle stretch 1000..2000 earns nothing.
        deposit(&h.ctx(), alice, token, STAKE, 2_000).unwrap();
        let second = withdraw(&h.ctx(), alice, token, 3_000).unwrap();
        assert_eq!(second.payout.reward, REWARD / 5);
        assert_eq!(second.entry.reward_claimed, 2 * (REWARD / 5));
    }

    #[test]
    fn test_escrow_shortfall_is_fatal_and_rolls_back() {
        let h = Harness::default();
        let token = setup(&h, &["alice"]);
        let alice = Identity::from_label("alice");
        deposit(&h.ctx(), alice, token, STAKE, 0).unwrap();

        // Drain escrow behind the engine's back.
        let ctx = h.ctx();
        let thief = Identity::from_label("thief");
        h.bank.transfer(&token, &ctx.escrow(&token), &thief, REWARD).unwrap();

        let err = withdraw(&ctx, alice, token, 5_000).unwrap_err();
        assert_eq!(
            err,
            StakingError::EscrowShortfall {
                required: STAKE + REWARD,
                available: STAKE
            }
        );
        let entry = UnitOfWork::new(ctx.store)
            .participant(&ctx.participant_address(&alice, &token))
            .unwrap()
            .unwrap();
        assert_eq!(entry.staked_amount, STAKE);
        assert_eq!(entry.rewards_accrued, 0);
    }
}
