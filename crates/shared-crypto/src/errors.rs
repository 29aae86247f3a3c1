//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key is not valid hex or not a valid secp256k1 scalar
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Input is not valid hex text
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignature,

    /// Recovery ID outside {0, 1}
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
