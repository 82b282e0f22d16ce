// crates/late-core/src/traits.rs

use crate::error::StakingError;
use crate::identity::{Address, Identity};
use crate::state::AccountRecord;

/// Deterministic storage-address derivation.
///
/// The same `(seed, components)` must always produce the same address; the
/// engine's "does this record already exist" checks rely on it.
/// Implemented by `Sha256Derivation`.
pub trait KeyDerivation: Send + Sync {
    fn derive(&self, seed: &[u8], components: &[&[u8]]) -> Address;
}

/// Token balances and transfers for a single host ledger.
///
/// Implemented by late-economics (`TokenBank`).
pub trait TokenTransfer: Send + Sync {
    /// Current balance of `holder` in `token`. Unknown holders have zero.
    fn balance(&self, token: &Identity, holder: &Identity) -> u64;

    /// Move `amount` of `token` from `from` to `to`, atomically.
    ///
    /// Returns `StakingError::InsufficientBalance` and moves nothing if
    /// `from` holds less than `amount`.
    fn transfer(
        &self,
        token: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u64,
    ) -> Result<(), StakingError>;
}

/// Persistent record storage keyed by derived address.
///
/// Implemented by late-store (in-memory map and RocksDB backends).
pub trait AccountStore: Send + Sync {
    /// Load the record at `address`, if one exists.
    fn load(&self, address: &Address) -> Result<Option<AccountRecord>, StakingError>;

    /// Write every record in `writes`, all or none.
    fn commit(&self, writes: Vec<(Address, AccountRecord)>) -> Result<(), StakingError>;

    /// Every stored record, ordered by address. For inspection, not for
    /// the hot path.
    fn records(&self) -> Result<Vec<(Address, AccountRecord)>, StakingError>;
}

/// Source of the current timestamp in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}
