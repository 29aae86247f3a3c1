//! # Keccak-256 Hashing
//!
//! The chain's digest function. Transactions are signed over the Keccak-256
//! digest of their protobuf encoding, and account addresses are the last
//! 20 bytes of the Keccak-256 of the uncompressed public key.
//!
//! Note: this is the original Keccak padding, not NIST SHA3-256.

use sha3::{Digest, Keccak256};

/// Keccak-256 output (256-bit).
pub type Hash = [u8; 32];

/// Stateful Keccak-256 hasher.
pub struct Keccak256Hasher {
    inner: Keccak256,
}

impl Keccak256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Keccak256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

impl Default for Keccak256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}
