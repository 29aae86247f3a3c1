//! # Signer Service
//!
//! Application service layer that implements the `TransactionSignerApi` trait.
//!
//! ## Pipeline
//!
//! ```text
//! fields -> FieldValidator -> wire::encode_transaction -> keccak256
//!        -> Secp256k1Signer -> envelope::assemble -> hex
//! ```

use crate::config::SignerConfig;
use crate::domain::entities::{DecodedTransaction, SignOutcome, Transaction, TransactionFields};
use crate::domain::envelope;
use crate::domain::errors::SignerError;
use crate::domain::validation::FieldValidator;
use crate::domain::wire::{self, Crypto};
use crate::ports::inbound::TransactionSignerApi;
use shared_crypto::{
    address_from_public_key, keccak256, Address, CryptoError, CurveContext, Hash,
    NonceGenerator, Secp256k1KeyPair, Secp256k1Signer,
};
use tracing::{debug, info, warn};

/// Transaction Signer Service.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SignerService {
    config: SignerConfig,
    validator: FieldValidator,
    signer: Secp256k1Signer,
}

impl SignerService {
    /// Create a new signer service.
    pub fn new(config: SignerConfig) -> Self {
        let config = config.sanitized();
        Self {
            validator: FieldValidator::new(NonceGenerator::new(config.nonce_bytes)),
            signer: Secp256k1Signer::new(CurveContext::secp256k1()),
            config,
        }
    }

    /// Create a service configured from the environment.
    pub fn from_env() -> Self {
        Self::new(SignerConfig::from_env())
    }

    /// Active configuration.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign an already-validated transaction.
    pub fn sign_transaction(
        &self,
        transaction: &Transaction,
        private_key: &str,
    ) -> Result<String, SignerError> {
        let keypair = parse_key(private_key)?;

        let encoded = wire::encode_transaction(transaction);
        let digest = keccak256(&encoded);
        debug!(
            encoded_len = encoded.len(),
            digest = %hex::encode(digest),
            "Transaction encoded"
        );

        let signature = self.signer.sign_prehash(&digest, &keypair)?;
        let signed = envelope::assemble(&encoded, Crypto::Secp, &signature, self.config.hex_prefix);

        info!(
            chain_id = transaction.chain_id,
            version = transaction.version,
            nonce = %transaction.nonce,
            valid_until_block = transaction.valid_until_block,
            "Transaction signed"
        );

        Ok(signed)
    }
}

impl Default for SignerService {
    fn default() -> Self {
        Self::new(SignerConfig::default())
    }
}

impl TransactionSignerApi for SignerService {
    fn sign(
        &self,
        fields: &TransactionFields,
        external_key: Option<&str>,
    ) -> Result<SignOutcome, SignerError> {
        let key = [external_key, fields.private_key.as_deref()]
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty());

        let Some(key) = key else {
            warn!("No private key found, returning unsigned transaction");
            return Ok(SignOutcome::Preview(self.validator.preview(fields)));
        };

        let transaction = self.validator.validate(fields)?;
        self.sign_transaction(&transaction, key).map(SignOutcome::Signed)
    }

    fn unsign(&self, signed: &str) -> Result<DecodedTransaction, SignerError> {
        let decoded = envelope::disassemble(signed, &self.signer)?;
        debug!(
            crypto = ?decoded.crypto,
            nonce = %decoded.transaction.nonce,
            "Signed transaction decoded"
        );
        Ok(decoded)
    }

    fn next_nonce(&self) -> String {
        self.validator.next_nonce()
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn parse_key(private_key: &str) -> Result<Secp256k1KeyPair, SignerError> {
    Secp256k1KeyPair::from_hex(private_key).map_err(|e| match e {
        CryptoError::InvalidPrivateKey => SignerError::InvalidKey,
        other => SignerError::Crypto(other),
    })
}

/// Keccak-256 digest that `sign` signs for `transaction`.
pub fn transaction_hash(transaction: &Transaction) -> Hash {
    keccak256(&wire::encode_transaction(transaction))
}

/// Account address controlled by a hex private key.
pub fn address_from_private_key(private_key: &str) -> Result<Address, SignerError> {
    Ok(address_from_public_key(&parse_key(private_key)?.public_key()))
}
