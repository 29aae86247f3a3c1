//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the signer.

use crate::domain::entities::{DecodedTransaction, SignOutcome, TransactionFields};
use crate::domain::errors::SignerError;

/// Primary Transaction Signing API.
///
/// Implementations must be thread-safe (`Send + Sync`); every call is an
/// independent, synchronous transformation.
pub trait TransactionSignerApi: Send + Sync {
    /// Validate, encode and sign `fields`.
    ///
    /// `external_key` takes precedence over `fields.private_key`. When
    /// neither is present, returns [`SignOutcome::Preview`] instead of an error.
    ///
    /// # Errors
    /// Any validation failure, or [`SignerError::InvalidKey`].
    fn sign(
        &self,
        fields: &TransactionFields,
        external_key: Option<&str>,
    ) -> Result<SignOutcome, SignerError>;

    /// Decode a hex envelope produced by [`sign`](Self::sign).
    fn unsign(&self, signed: &str) -> Result<DecodedTransaction, SignerError>;

    /// Generate a nonce suitable for `TransactionFields::nonce`.
    fn next_nonce(&self) -> String;
}
