use thiserror::Error;

/// Protocol-wide error types for Late Staking.
///
/// Every variant is raised inside the exclusive section of a single operation,
/// before anything is committed, so an error always means "no effect".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    /// A registry or pool already exists for this token.
    #[error("Already initialized: {0}")]
    AlreadyInitialized(String),

    /// Caller is not the owner required for an administrative operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Period end is not strictly after the activation time.
    #[error("Invalid period: period end {period_end} is not after current time {now}")]
    InvalidPeriod { period_end: u64, now: u64 },

    /// Zero amount where a positive amount is required.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transfer source lacks funds.
    #[error("Insufficient balance: requested {requested} but only {available} available")]
    InsufficientBalance { requested: u64, available: u64 },

    /// A checked multiply/add/sub left the representable range.
    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// Registry, pool, or ledger entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Deposit attempted after the reward period closed.
    #[error("Staking period ended at {period_end} (current time {now})")]
    StakingPeriodEnded { period_end: u64, now: u64 },

    /// Escrow cannot cover a payout. Unreachable while truncation always
    /// rounds in the pool's favour; seeing it means the books are wrong.
    #[error("Escrow shortfall: payout {required} exceeds escrow balance {available}")]
    EscrowShortfall { required: u64, available: u64 },

    /// Storage backend error (RocksDB, in-memory map).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Broken internal invariant (poisoned lock, mismatched record kind).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for StakingError {
    fn from(e: serde_json::Error) -> Self {
        StakingError::Serialization(e.to_string())
    }
}
