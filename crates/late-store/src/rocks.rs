// crates/late-store/src/rocks.rs
//
// RocksDB-backed persistent storage for account records.
//
// Key format:
//   - `acct:{address_hex}` -> JSON-serialized AccountRecord
//
// A commit is written as one WriteBatch, so a unit of work lands entirely
// or not at all, including across process crashes.

use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteBatch};

use late_core::{AccountRecord, AccountStore, Address, StakingError};

const ACCOUNT_PREFIX: &str = "acct:";

/// RocksDB wrapper implementing the `AccountStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, StakingError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path).map_err(|e| {
            StakingError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
        })?;

        Ok(Self { db })
    }

    /// Build the key for a record: `acct:{address_hex}`.
    fn account_key(address: &Address) -> Vec<u8> {
        format!("{}{}", ACCOUNT_PREFIX, address.to_hex()).into_bytes()
    }

    /// Get raw bytes from RocksDB, mapping errors to StakingError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StakingError> {
        self.db
            .get(key)
            .map_err(|e| StakingError::Storage(format!("RocksDB get failed: {}", e)))
    }
}

impl AccountStore for RocksStore {
    fn load(&self, address: &Address) -> Result<Option<AccountRecord>, StakingError> {
        match self.get_raw(&Self::account_key(address))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn commit(&self, writes: Vec<(Address, AccountRecord)>) -> Result<(), StakingError> {
        let mut batch = WriteBatch::default();
        for (address, record) in &writes {
            let json = serde_json::to_vec(record)?;
            batch.put(Self::account_key(address), json);
        }
        self.db
            .write(batch)
            .map_err(|e| StakingError::Storage(format!("RocksDB batch write failed: {}", e)))
    }

    fn records(&self) -> Result<Vec<(Address, AccountRecord)>, StakingError> {
        let prefix = ACCOUNT_PREFIX.as_bytes();
        let mut records = Vec::new();

        for item in self.db.prefix_iterator(prefix) {
            let (key, value) = item
                .map_err(|e| StakingError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // Keys are `acct:{hex}`. Stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }

            let hex = std::str::from_utf8(&key[prefix.len()..])
                .map_err(|e| StakingError::Storage(format!("Malformed account key: {}", e)))?;
            let address = Address::from_hex(hex)?;
            let record: AccountRecord = serde_json::from_slice(&value)?;
            records.push((address, record));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_key_format() {
        let key = RocksStore::account_key(&Address([0xab; 32]));
        let key = String::from_utf8(key).unwrap();
        assert!(key.starts_with("acct:abab"));
        assert_eq!(key.len(), ACCOUNT_PREFIX.len() + 64);
    }
}
