// crates/late-core/src/identity.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::hash_bytes;
use crate::error::StakingError;

/// A 32-byte identity on the host ledger.
///
/// Used for participants, protocol owners, fee recipients, token mints, and
/// escrow holders. The all-zero identity is reserved as "unset".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Identity(pub [u8; 32]);

/// Storage address of a persisted record, produced by a `KeyDerivation`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Address(pub [u8; 32]);

impl Identity {
    /// The all-zero identity.
    pub const ZERO: Identity = Identity([0u8; 32]);

    /// Deterministic identity from a human-readable label (SHA-256 of the label).
    ///
    /// Scenario files and tests name participants ("alice", "owner") and
    /// get stable identities back.
    pub fn from_label(label: &str) -> Self {
        Self(hash_bytes(label.as_bytes()))
    }

    /// Fresh random identity.
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, no prefix.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    /// Parse 64 hex characters, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, StakingError> {
        decode_hex(s).map(Self)
    }
}

impl Address {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, StakingError> {
        decode_hex(s).map(Self)
    }
}

/// Escrow balances are held by the pool's derived address.
impl From<Address> for Identity {
    fn from(address: Address) -> Self {
        Identity(address.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

fn encode_hex(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn decode_hex(s: &str) -> Result<[u8; 32], StakingError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() != 64 || !s.is_ascii() {
        return Err(StakingError::Serialization(format!(
            "Expected 64 hex characters, got {:?}",
            s
        )));
    }

    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
            .map_err(|e| StakingError::Serialization(format!("Invalid hex: {}", e)))?;
    }
    Ok(out)
}
