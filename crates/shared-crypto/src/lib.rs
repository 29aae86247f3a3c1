//! # Shared Crypto - Signing Primitives
//!
//! Cryptographic building blocks used by the transaction signer.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Transaction digest, address derivation |
//! | `ecdsa` | secp256k1 | Recoverable transaction signatures |
//! | `address` | Keccak-256 / EIP-55 | Account address validation |
//! | `nonce` | OS randomness | Anti-replay tokens |
//! | `encoding` | hex | Byte/hex conversion |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalization enforced
//!   by [`Secp256k1Signer`] itself
//! - **Nonces**: drawn from the operating system RNG

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod ecdsa;
pub mod encoding;
pub mod errors;
pub mod hashing;
pub mod nonce;

// Re-exports
pub use address::{address_from_public_key, is_address, to_checksum_address, Address};
pub use ecdsa::{
    CurveContext, RecoverableSignature, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signer,
};
pub use encoding::{bytes_to_hex, hex_to_bytes, strip_hex_prefix};
pub use errors::CryptoError;
pub use hashing::{keccak256, Hash, Keccak256Hasher};
pub use nonce::{NonceGenerator, DEFAULT_NONCE_BYTES};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
