//! # Domain Entities
//!
//! Caller-facing field bag, the normalized transaction, and the results of
//! `sign` / `unsign`.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use shared_crypto::{Address, Secp256k1PublicKey};
use std::fmt;

/// Largest integer a JSON number carries exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Width of the encoded `value` field.
pub const VALUE_LENGTH: usize = 32;

/// Maximum number of significant bytes in `value` (2^128 - 1).
pub const MAX_VALUE_BYTES: usize = 16;

/// Maximum nonce length in UTF-16 code units.
pub const MAX_NONCE_LENGTH: usize = 128;

// =============================================================================
// Caller Input
// =============================================================================

/// Transfer amount as supplied by the caller.
///
/// Hex text is read as hex even without a `0x` prefix, so `"100"` is 256.
/// Negative numbers deserialize and are rejected later as `InvalidValue`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValueInput {
    /// Plain integer
    Number(i128),
    /// Hex string, `0x` optional
    Hex(String),
}

impl From<u64> for ValueInput {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for ValueInput {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u128> for ValueInput {
    fn from(value: u128) -> Self {
        match i128::try_from(value) {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Hex(format!("{value:x}")),
        }
    }
}

impl From<&str> for ValueInput {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_string())
    }
}

impl From<String> for ValueInput {
    fn from(value: String) -> Self {
        Self::Hex(value)
    }
}

/// Block height as supplied by the caller: a number, or decimal / `0x` hex text.
///
/// Numbers that are not block heights (negative, fractional) deserialize as
/// text and fail later as `MissingExpiry`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockNumber {
    /// Plain integer
    Number(u64),
    /// Numeric text
    Text(String),
}

impl From<u64> for BlockNumber {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for BlockNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for ValueInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueInputVisitor;

        impl<'de> Visitor<'de> for ValueInputVisitor {
            type Value = ValueInput;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer no larger than 2^53 or a hex string")
            }

            fn visit_str<E>(self, value: &str) -> Result<ValueInput, E>
            where
                E: de::Error,
            {
                Ok(ValueInput::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<ValueInput, E>
            where
                E: de::Error,
            {
                Ok(ValueInput::from(value))
            }

            // Negative amounts are rejected by validation, not here
            fn visit_i64<E>(self, value: i64) -> Result<ValueInput, E>
            where
                E: de::Error,
            {
                Ok(ValueInput::from(value))
            }

            fn visit_u128<E>(self, value: u128) -> Result<ValueInput, E>
            where
                E: de::Error,
            {
                Ok(ValueInput::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<ValueInput, E>
            where
                E: de::Error,
            {
                Ok(ValueInput::Number(value))
            }

            // JSON integers past 2^53 arrive here already rounded
            fn visit_f64<E>(self, value: f64) -> Result<ValueInput, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT {
                    Ok(ValueInput::Number(value as i128))
                } else {
                    Err(de::Error::invalid_value(Unexpected::Float(value), &self))
                }
            }
        }

        deserializer.deserialize_any(ValueInputVisitor)
    }
}

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BlockNumberVisitor;

        impl<'de> Visitor<'de> for BlockNumberVisitor {
            type Value = BlockNumber;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a block number or numeric text")
            }

            fn visit_str<E>(self, value: &str) -> Result<BlockNumber, E>
            where
                E: de::Error,
            {
                Ok(BlockNumber::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<BlockNumber, E>
            where
                E: de::Error,
            {
                Ok(BlockNumber::Number(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<BlockNumber, E>
            where
                E: de::Error,
            {
                Ok(block_or_text(value))
            }

            fn visit_u128<E>(self, value: u128) -> Result<BlockNumber, E>
            where
                E: de::Error,
            {
                Ok(block_or_text(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<BlockNumber, E>
            where
                E: de::Error,
            {
                Ok(block_or_text(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<BlockNumber, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && (0.0..=MAX_EXACT_FLOAT).contains(&value) {
                    Ok(BlockNumber::Number(value as u64))
                } else {
                    Ok(BlockNumber::Text(value.to_string()))
                }
            }
        }

        deserializer.deserialize_any(BlockNumberVisitor)
    }
}

/// Heights outside `u64` stay textual so validation reports them.
fn block_or_text<T>(value: T) -> BlockNumber
where
    T: Copy + ToString + TryInto<u64>,
{
    value
        .try_into()
        .map(BlockNumber::Number)
        .unwrap_or_else(|_| BlockNumber::Text(value.to_string()))
}

/// Every field a caller may supply to `sign`.
///
/// Deserializes from the camelCase JSON shape wallets already use.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFields {
    /// Claimed sender; echoed in previews, never encoded
    pub from: Option<String>,
    /// Hex private key, `0x` optional
    pub private_key: Option<String>,
    pub nonce: Option<String>,
    pub quota: Option<i64>,
    pub valid_until_block: Option<BlockNumber>,
    pub value: Option<ValueInput>,
    /// Hex payload, `0x` optional
    pub data: Option<String>,
    pub to: Option<String>,
    pub chain_id: Option<u32>,
    pub version: Option<u32>,
}

impl fmt::Debug for TransactionFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionFields")
            .field("from", &self.from)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("nonce", &self.nonce)
            .field("quota", &self.quota)
            .field("valid_until_block", &self.valid_until_block)
            .field("value", &self.value)
            .field("data", &self.data)
            .field("to", &self.to)
            .field("chain_id", &self.chain_id)
            .field("version", &self.version)
            .finish()
    }
}

// =============================================================================
// Normalized Transaction
// =============================================================================

/// A validated transaction, ready for encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: String,
    pub quota: u64,
    pub to: Option<Address>,
    /// Big-endian, right-aligned
    pub value: [u8; VALUE_LENGTH],
    pub data: Vec<u8>,
    pub valid_until_block: u64,
    pub chain_id: u32,
    pub version: u32,
}

impl Transaction {
    /// Recipient as lower-case hex without prefix.
    pub fn to_hex(&self) -> Option<String> {
        self.to.map(hex::encode)
    }

    /// Value as an integer (fits, since at most 16 bytes are significant).
    pub fn value_u128(&self) -> u128 {
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.value[VALUE_LENGTH - 16..]);
        u128::from_be_bytes(low)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Input fields echoed back when no key material was supplied.
///
/// Defaults are resolved (nonce generated, version 0) but nothing is
/// validated or encoded. Not a signed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedPreview {
    pub from: Option<String>,
    pub nonce: String,
    pub quota: Option<i64>,
    pub valid_until_block: Option<BlockNumber>,
    pub value: Option<ValueInput>,
    pub data: Option<String>,
    pub to: Option<String>,
    pub chain_id: Option<u32>,
    pub version: u32,
}

/// Result of `sign`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignOutcome {
    /// Hex-encoded signed envelope
    Signed(String),
    /// No key material; the unsigned fields
    Preview(UnsignedPreview),
}

impl SignOutcome {
    /// The signed hex, if any.
    pub fn signed(&self) -> Option<&str> {
        match self {
            Self::Signed(hex) => Some(hex),
            Self::Preview(_) => None,
        }
    }

    /// Consume into the signed hex, if any.
    pub fn into_signed(self) -> Option<String> {
        match self {
            Self::Signed(hex) => Some(hex),
            Self::Preview(_) => None,
        }
    }
}

/// Sender recovered from a secp256k1 envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub address: Address,
    pub public_key: Secp256k1PublicKey,
}

/// Result of `unsign`: the decoded envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub transaction: Transaction,
    pub crypto: crate::domain::wire::Crypto,
    /// Raw signature bytes (65 for secp256k1)
    pub signature: Vec<u8>,
    /// Recovered sender; `None` for schemes this crate cannot verify
    pub sender: Option<Sender>,
}
