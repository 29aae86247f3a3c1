//! Anti-replay nonce generation.

use rand::rngs::OsRng;
use rand::RngCore;

/// Default number of random bytes in a generated nonce (10 hex characters).
pub const DEFAULT_NONCE_BYTES: usize = 5;

/// Produces random hex tokens from the operating system RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceGenerator {
    bytes: usize,
}

impl NonceGenerator {
    /// Create a generator emitting `bytes` random bytes per nonce.
    pub fn new(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Number of random bytes per nonce.
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    /// Generate a fresh nonce as lower-case hex without prefix.
    pub fn generate(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        OsRng.fill_bytes(&mut buf);
        hex::encode(buf)
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NONCE_BYTES)
    }
}
