//! # Wire Schema
//!
//! Protobuf messages accepted by the chain's RPC, and the deterministic
//! encoder from a validated [`entities::Transaction`].
//!
//! prost writes fields in tag order and omits proto3 defaults, so equal
//! transactions always encode to identical bytes.
//!
//! | version | recipient | chain id |
//! |---------|-----------|----------|
//! | 0 | `to` (lower-case hex text) | `chain_id` (uint32) |
//! | 1 | `to_v1` (20 raw bytes) | `chain_id_v1` (32-byte big-endian) |

use super::entities::{self, VALUE_LENGTH};
use super::errors::SignerError;
use prost::Message;
use shared_crypto::Address;

/// Highest wire-schema version this crate encodes.
pub const MAX_SUPPORTED_VERSION: u32 = 1;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(string, tag = "1")]
    pub to: String,
    #[prost(string, tag = "2")]
    pub nonce: String,
    #[prost(uint64, tag = "3")]
    pub quota: u64,
    #[prost(uint64, tag = "4")]
    pub valid_until_block: u64,
    #[prost(bytes = "vec", tag = "5")]
    pub data: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub value: Vec<u8>,
    #[prost(uint32, tag = "7")]
    pub chain_id: u32,
    #[prost(uint32, tag = "8")]
    pub version: u32,
    #[prost(bytes = "vec", tag = "9")]
    pub to_v1: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub chain_id_v1: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnverifiedTransaction {
    #[prost(message, optional, tag = "1")]
    pub transaction: Option<Transaction>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
    #[prost(enumeration = "Crypto", tag = "3")]
    pub crypto: i32,
}

/// Signature scheme tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Crypto {
    Secp = 0,
    Sm2 = 1,
}

impl Crypto {
    /// Parse a raw enum value, rejecting unknown tags.
    pub fn from_tag(tag: i32) -> Result<Self, SignerError> {
        match tag {
            0 => Ok(Self::Secp),
            1 => Ok(Self::Sm2),
            other => Err(SignerError::MalformedEnvelope(format!(
                "unknown crypto tag {other}"
            ))),
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

impl From<&entities::Transaction> for Transaction {
    fn from(tx: &entities::Transaction) -> Self {
        let mut msg = Transaction {
            nonce: tx.nonce.clone(),
            quota: tx.quota,
            valid_until_block: tx.valid_until_block,
            data: tx.data.clone(),
            value: tx.value.to_vec(),
            version: tx.version,
            ..Default::default()
        };

        if tx.version == 0 {
            msg.to = tx.to_hex().unwrap_or_default();
            msg.chain_id = tx.chain_id;
        } else {
            msg.to_v1 = tx.to.map(|a| a.to_vec()).unwrap_or_default();
            let mut chain_id = [0u8; 32];
            chain_id[28..].copy_from_slice(&tx.chain_id.to_be_bytes());
            msg.chain_id_v1 = chain_id.to_vec();
        }

        msg
    }
}

/// Serialize a validated transaction into its protobuf bytes.
pub fn encode_transaction(tx: &entities::Transaction) -> Vec<u8> {
    Transaction::from(tx).encode_to_vec()
}

// =============================================================================
// DECODING
// =============================================================================

impl TryFrom<Transaction> for entities::Transaction {
    type Error = SignerError;

    fn try_from(msg: Transaction) -> Result<Self, Self::Error> {
        let (to, chain_id) = match msg.version {
            0 => (decode_text_address(&msg.to)?, msg.chain_id),
            1 => (
                decode_raw_address(&msg.to_v1)?,
                decode_chain_id_v1(&msg.chain_id_v1)?,
            ),
            other => return Err(SignerError::UnsupportedVersion(other)),
        };

        if msg.value.len() > VALUE_LENGTH {
            return Err(malformed("value wider than 32 bytes"));
        }
        let mut value = [0u8; VALUE_LENGTH];
        value[VALUE_LENGTH - msg.value.len()..].copy_from_slice(&msg.value);

        Ok(Self {
            nonce: msg.nonce,
            quota: msg.quota,
            to,
            value,
            data: msg.data,
            valid_until_block: msg.valid_until_block,
            chain_id,
            version: msg.version,
        })
    }
}

fn decode_text_address(to: &str) -> Result<Option<Address>, SignerError> {
    if to.is_empty() {
        return Ok(None);
    }
    let bytes = hex::decode(to).map_err(|_| malformed("recipient is not hex"))?;
    decode_raw_address(&bytes)
}

fn decode_raw_address(to: &[u8]) -> Result<Option<Address>, SignerError> {
    if to.is_empty() {
        return Ok(None);
    }
    Address::try_from(to)
        .map(Some)
        .map_err(|_| malformed("recipient is not 20 bytes"))
}

fn decode_chain_id_v1(bytes: &[u8]) -> Result<u32, SignerError> {
    if bytes.len() > 32 {
        return Err(malformed("chain id wider than 32 bytes"));
    }
    let split = bytes.len().saturating_sub(4);
    if bytes[..split].iter().any(|&b| b != 0) {
        return Err(malformed("chain id exceeds 32 bits"));
    }
    Ok(bytes[split..]
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
}

fn malformed(reason: &str) -> SignerError {
    SignerError::MalformedEnvelope(reason.to_string())
}
