//! # Transaction Signer
//!
//! Offline construction and signing of transactions for a proof-of-authority
//! chain. Produces the hex-encoded `UnverifiedTransaction` envelope that
//! nodes accept over RPC, and decodes such envelopes back.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): validation, wire schema, envelope; no I/O
//! - **Ports Layer** (`ports/`): the `TransactionSignerApi` trait
//! - **Service Layer** (`service.rs`): wires domain logic to the port
//!
//! ## Security Notes
//!
//! - Signatures are always low-S with recovery ID in {0, 1}
//! - Private keys are never logged; `TransactionFields` redacts them in `Debug`
//! - Nonces come from the OS RNG
//!
//! ## Example
//!
//! ```rust,ignore
//! use tx_signer::{SignerService, TransactionFields, TransactionSignerApi};
//!
//! let service = SignerService::default();
//! let fields = TransactionFields {
//!     private_key: Some(key),
//!     quota: Some(1_000_000),
//!     valid_until_block: Some(current_height.into()),
//!     chain_id: Some(1),
//!     ..Default::default()
//! };
//! let signed = service.sign(&fields, None)?;
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::SignerConfig;
pub use domain::entities::{
    BlockNumber, DecodedTransaction, Sender, SignOutcome, Transaction, TransactionFields,
    UnsignedPreview, ValueInput,
};
pub use domain::errors::SignerError;
pub use domain::validation::FieldValidator;
pub use domain::wire::{encode_transaction, Crypto};
pub use ports::inbound::TransactionSignerApi;
pub use service::{address_from_private_key, transaction_hash, SignerService};
pub use shared_crypto::{bytes_to_hex, hex_to_bytes};
