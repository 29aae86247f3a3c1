//! Signer configuration from environment variables.

use serde::{Deserialize, Serialize};
use shared_crypto::DEFAULT_NONCE_BYTES;
use std::env;

/// Largest generated nonce, in bytes (128 hex characters).
pub const MAX_NONCE_BYTES: usize = 64;

/// Configuration for [`SignerService`](crate::service::SignerService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Random bytes per generated nonce (1..=64)
    pub nonce_bytes: usize,

    /// Prefix signed output with `0x`
    pub hex_prefix: bool,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            nonce_bytes: DEFAULT_NONCE_BYTES,
            hex_prefix: false,
        }
    }
}

impl SignerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIGNER_NONCE_BYTES`: Random bytes per generated nonce (default: 5)
    /// - `SIGNER_HEX_PREFIX`: Prefix signed output with `0x` (default: false)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            nonce_bytes: env::var("SIGNER_NONCE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nonce_bytes),

            hex_prefix: env::var("SIGNER_HEX_PREFIX")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.hex_prefix),
        }
        .sanitized()
    }

    /// Clamp `nonce_bytes` so generated nonces are non-empty and fit 128 characters.
    pub fn sanitized(mut self) -> Self {
        self.nonce_bytes = self.nonce_bytes.clamp(1, MAX_NONCE_BYTES);
        self
    }
}
