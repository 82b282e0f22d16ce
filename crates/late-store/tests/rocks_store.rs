// crates/late-store/tests/rocks_store.rs
//
// Integration tests for the RocksDB account store: persistence across
// reopen, atomic batches, and ordered scans.

use late_core::{
    AccountRecord, AccountStore, Address, Identity, ParticipantLedgerEntry, StakingPoolState,
};
use late_store::RocksStore;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory path using UUID to avoid conflicts.
fn temp_db_path(label: &str) -> String {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("late_test_{}_{}", label, Uuid::now_v7()));
    path.to_string_lossy().to_string()
}

fn pool() -> StakingPoolState {
    StakingPoolState {
        owner: Identity::from_label("owner"),
        token: Identity::from_label("token"),
        period_start: 0,
        period_end: 5_000,
        total_reward: 5_000_000_000_000,
        reward_per_second: 1_000_000_000_000_000_000_000_000_000,
        total_staked: 10_000_000_000,
        reward_per_token_stored: 500_000_000_000_000_000_000,
        last_update_time: 5_000,
    }
}

fn entry(label: &str, staked: u64) -> ParticipantLedgerEntry {
    let mut e = ParticipantLedgerEntry::new(Identity::from_label(label), Identity::from_label("token"));
    e.staked_amount = staked;
    e
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_records_survive_reopen() {
    let path = temp_db_path("reopen");
    {
        let store = RocksStore::open(&path).unwrap();
        store
            .commit(vec![
                (Address([1u8; 32]), AccountRecord::Pool(pool())),
                (Address([2u8; 32]), AccountRecord::Participant(entry("alice", 7))),
            ])
            .unwrap();
    }

    let store = RocksStore::open(&path).unwrap();
    assert_eq!(
        store.load(&Address([1u8; 32])).unwrap(),
        Some(AccountRecord::Pool(pool()))
    );
    assert_eq!(
        store.load(&Address([2u8; 32])).unwrap(),
        Some(AccountRecord::Participant(entry("alice", 7)))
    );
    assert!(store.load(&Address([3u8; 32])).unwrap().is_none());
}

#[test]
fn test_commit_overwrites_existing_record() {
    let path = temp_db_path("overwrite");
    let store = RocksStore::open(&path).unwrap();
    let address = Address([5u8; 32]);

    store
        .commit(vec![(address, AccountRecord::Participant(entry("alice", 1)))])
        .unwrap();
    store
        .commit(vec![(address, AccountRecord::Participant(entry("alice", 2)))])
        .unwrap();

    let loaded = store.load(&address).unwrap().unwrap();
    assert_eq!(loaded.as_participant().unwrap().staked_amount, 2);
}

#[test]
fn test_records_scan_in_address_order() {
    let path = temp_db_path("scan");
    let store = RocksStore::open(&path).unwrap();
    store
        .commit(vec![
            (Address([9u8; 32]), AccountRecord::Participant(entry("z", 1))),
            (Address([3u8; 32]), AccountRecord::Participant(entry("y", 2))),
            (Address([6u8; 32]), AccountRecord::Pool(pool())),
        ])
        .unwrap();

    let records = store.records().unwrap();
    let addresses: Vec<Address> = records.iter().map(|(a, _)| *a).collect();
    assert_eq!(
        addresses,
        vec![Address([3u8; 32]), Address([6u8; 32]), Address([9u8; 32])]
    );
    assert_eq!(records[1].1.kind(), "pool");
}
