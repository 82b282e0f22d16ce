// crates/late-store/src/memory.rs
//
// In-memory account store implementing the `AccountStore` trait.
//
// Records live in a BTreeMap behind an RwLock, so `records()` comes back in
// address order just like the RocksDB backend. A commit inserts its whole
// batch under one write lock, which makes it atomic with respect to readers.

use std::collections::BTreeMap;
use std::sync::RwLock;

use late_core::{AccountRecord, AccountStore, Address, StakingError};

/// In-memory `AccountStore` for tests, simulations, and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<Address, AccountRecord>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of records currently stored.
    pub fn len(&self) -> Result<usize, StakingError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.len())
    }

    /// Return whether the store is empty.
    pub fn is_empty(&self) -> Result<bool, StakingError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> StakingError {
    StakingError::Storage("memory store lock poisoned".to_string())
}

impl AccountStore for MemoryStore {
    fn load(&self, address: &Address) -> Result<Option<AccountRecord>, StakingError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(address).cloned())
    }

    fn commit(&self, writes: Vec<(Address, AccountRecord)>) -> Result<(), StakingError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.extend(writes);
        Ok(())
    }

    fn records(&self) -> Result<Vec<(Address, AccountRecord)>, StakingError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().map(|(a, r)| (*a, r.clone())).collect())
    }
}
