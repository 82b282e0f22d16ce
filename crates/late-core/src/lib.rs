// crates/late-core/src/lib.rs
//
// late-core: Core types, persisted records, and collaborator traits for
// Late Staking.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines identities and storage addresses, the three persisted record
// types, the protocol-wide error enum, and the trait seams through which the
// engine reaches its external collaborators (key derivation, token transfer,
// account storage, and the clock).

pub mod crypto;
pub mod error;
pub mod identity;
pub mod state;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use late_core::StakingPoolState;`

// Identity types
pub use identity::{Address, Identity};

// Persisted records
pub use state::{
    AccountRecord, ParticipantLedgerEntry, ProtocolRegistryRecord, StakingPoolState,
    ESCROW_SEED, FEE_PRECISION, PARTICIPANT_SEED, POOL_SEED, PROTOCOL_FEE, REGISTRY_SEED,
};

// Key derivation
pub use crypto::{hash_bytes, Sha256Derivation};

// Error type
pub use error::StakingError;

// Traits
pub use traits::{AccountStore, Clock, KeyDerivation, TokenTransfer};
