// crates/late-store/src/lib.rs
//
// late-store: Storage layer for Late Staking.
//
// Provides two `AccountStore` backends for the persisted registry, pool,
// and participant records: an in-memory map for tests and simulations, and
// RocksDB for durable state. Both commit a unit of work atomically.

pub mod memory;
pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::MemoryStore;
pub use rocks::RocksStore;
