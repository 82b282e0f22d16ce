// crates/late-economics/src/lib.rs
//
// late-economics: the time-weighted reward engine and the staking
// operations built on it.
//
// All token amounts are u64 in the staked token's smallest unit. Reward
// rates and the per-token accumulator are u128 fixed-point values scaled by
// SCALE (10^18); every division truncates, in the pool's favour.

pub mod bank;
pub mod clock;
pub mod handlers;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod program;
pub mod registry;
pub mod rewards;

// Re-export key types for ergonomic access from downstream crates.
pub use bank::TokenBank;
pub use clock::{ManualClock, SystemClock};
pub use handlers::{HandlerContext, WithdrawReceipt};
pub use ledger::Payout;
pub use math::SCALE;
pub use program::StakingProgram;
pub use rewards::{pending_rewards, reward_rate, settle_global, settle_participant};
