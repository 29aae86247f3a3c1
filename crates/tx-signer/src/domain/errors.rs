//! # Signer Errors
//!
//! Every failure is an input-validation or cryptographic-precondition error.
//! None are transient, and none leave a partial envelope behind.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while signing or decoding a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// Nonce longer than 128 characters
    #[error("Nonce should be random string with max length of 128")]
    InvalidNonce,

    /// Quota missing, zero or negative
    #[error("Quota should be larger than 0")]
    InvalidQuota,

    /// Value negative, not hex, or wider than 16 bytes
    #[error("Value should be a non-negative integer no larger than 0xffffffffffffffffffffffffffffffff")]
    InvalidValue,

    /// `to` present but not a valid address
    #[error("Invalid to address")]
    InvalidAddress,

    /// `validUntilBlock` missing or not an integer
    #[error("ValidUntilBlock should be set")]
    MissingExpiry,

    /// `chainId` missing
    #[error("Chain Id should be set")]
    MissingChainId,

    /// `data` present but not valid hex
    #[error("Data should be a hex string")]
    InvalidData,

    /// Private key is not a valid secp256k1 scalar
    #[error("Invalid private key")]
    InvalidKey,

    /// Wire-schema version this signer cannot encode
    #[error("Unsupported transaction version: {0}")]
    UnsupportedVersion(u32),

    /// Envelope text is not valid hex
    #[error("Signed transaction is not valid hex")]
    InvalidHex,

    /// Envelope bytes do not decode as a signed transaction
    #[error("Malformed signed transaction: {0}")]
    MalformedEnvelope(String),

    /// Sender public key could not be recovered from the signature
    #[error("Failed to recover sender from signature")]
    RecoveryFailed,

    /// Unexpected failure inside a cryptographic primitive
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
