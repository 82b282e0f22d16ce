// crates/late-core/src/crypto.rs

use sha2::{Digest, Sha256};

use crate::identity::{Address, Identity};
use crate::traits::KeyDerivation;

/// Compute SHA-256 hash of the given bytes.
///
/// Returns a 32-byte hash.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA-256 address derivation namespaced by a program identity.
///
/// Each input is length-prefixed before hashing so that `("ab", "c")` and
/// `("a", "bc")` never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Derivation {
    program_id: Identity,
}

impl Sha256Derivation {
    pub fn new(program_id: Identity) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> Identity {
        self.program_id
    }
}

impl Default for Sha256Derivation {
    fn default() -> Self {
        Self::new(Identity::from_label("late-staking"))
    }
}

impl KeyDerivation for Sha256Derivation {
    fn derive(&self, seed: &[u8], components: &[&[u8]]) -> Address {
        let mut hasher = Sha256::new();
        hasher.update(self.program_id.as_bytes());
        for part in std::iter::once(seed).chain(components.iter().copied()) {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        let mut output = [0u8; 32];
        output.copy_from_slice(&hasher.finalize());
        Address(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let data = b"late staking";
        let hash = hash_bytes(data);
        assert_eq!(hash.len(), 32);

        // Same input should produce same hash
        let hash2 = hash_bytes(data);
        assert_eq!(hash, hash2);

        // Different input should produce different hash
        let hash3 = hash_bytes(b"different");
        assert_ne!(hash, hash3);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let kd = Sha256Derivation::default();
        let token = Identity::from_label("token");
        let a = kd.derive(b"staking_config", &[token.as_bytes()]);
        let b = kd.derive(b"staking_config", &[token.as_bytes()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_derivation_separates_seeds_and_components() {
        let kd = Sha256Derivation::default();
        assert_ne!(kd.derive(b"ab", &[b"c"]), kd.derive(b"a", &[b"bc"]));
        assert_ne!(kd.derive(b"x", &[]), kd.derive(b"y", &[]));
    }

    #[test]
    fn test_derivation_namespaced_by_program() {
        let one = Sha256Derivation::new(Identity::from_label("one"));
        let two = Sha256Derivation::new(Identity::from_label("two"));
        assert_ne!(one.derive(b"seed", &[]), two.derive(b"seed", &[]));
    }
}
