//! # Field Validation
//!
//! Turns caller-supplied [`TransactionFields`] into a normalized
//! [`Transaction`], one rule per field, failing on the first violation.
//! Nonce resolution is an explicit step here, executed once per call.

use super::entities::{
    BlockNumber, Transaction, TransactionFields, UnsignedPreview, ValueInput, MAX_NONCE_LENGTH,
    MAX_VALUE_BYTES, VALUE_LENGTH,
};
use super::errors::SignerError;
use super::wire::MAX_SUPPORTED_VERSION;
use shared_crypto::{hex_to_bytes, is_address, strip_hex_prefix, Address, NonceGenerator};

/// Validates and normalizes transaction fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator {
    nonces: NonceGenerator,
}

impl FieldValidator {
    /// Create a validator drawing missing nonces from `nonces`.
    pub fn new(nonces: NonceGenerator) -> Self {
        Self { nonces }
    }

    /// Generate a fresh nonce.
    pub fn next_nonce(&self) -> String {
        self.nonces.generate()
    }

    /// Validate every field and build the transaction to sign.
    pub fn validate(&self, fields: &TransactionFields) -> Result<Transaction, SignerError> {
        let nonce = self.resolve_nonce(fields.nonce.as_deref())?;
        let quota = normalize_quota(fields.quota)?;
        let value = normalize_value(fields.value.as_ref())?;
        let to = normalize_to(fields.to.as_deref())?;
        let valid_until_block = normalize_valid_until_block(fields.valid_until_block.as_ref())?;
        let chain_id = fields.chain_id.ok_or(SignerError::MissingChainId)?;
        let data = normalize_data(fields.data.as_deref())?;
        let version = normalize_version(fields.version)?;

        Ok(Transaction {
            nonce,
            quota,
            to,
            value,
            data,
            valid_until_block,
            chain_id,
            version,
        })
    }

    /// Echo the fields back unvalidated, with nonce and version resolved.
    pub fn preview(&self, fields: &TransactionFields) -> UnsignedPreview {
        let nonce = match fields.nonce.as_deref() {
            Some(nonce) if !nonce.is_empty() => nonce.to_string(),
            _ => self.next_nonce(),
        };

        UnsignedPreview {
            from: fields.from.clone(),
            nonce,
            quota: fields.quota,
            valid_until_block: fields.valid_until_block.clone(),
            value: fields.value.clone(),
            data: fields.data.clone(),
            to: fields.to.clone(),
            chain_id: fields.chain_id,
            version: fields.version.unwrap_or(0),
        }
    }

    /// Use the caller's nonce, or generate one when absent or empty.
    fn resolve_nonce(&self, nonce: Option<&str>) -> Result<String, SignerError> {
        match nonce {
            None | Some("") => Ok(self.next_nonce()),
            Some(nonce) if nonce.encode_utf16().count() > MAX_NONCE_LENGTH => {
                Err(SignerError::InvalidNonce)
            }
            Some(nonce) => Ok(nonce.to_string()),
        }
    }
}

fn normalize_quota(quota: Option<i64>) -> Result<u64, SignerError> {
    match quota {
        Some(q) if q > 0 => Ok(q as u64),
        _ => Err(SignerError::InvalidQuota),
    }
}

/// Right-align the value in a 32-byte big-endian buffer.
fn normalize_value(value: Option<&ValueInput>) -> Result<[u8; VALUE_LENGTH], SignerError> {
    let significant = match value {
        None => Vec::new(),
        Some(ValueInput::Number(n)) => {
            let n = u128::try_from(*n).map_err(|_| SignerError::InvalidValue)?;
            let bytes = n.to_be_bytes();
            let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
            bytes[first..].to_vec()
        }
        Some(ValueInput::Hex(text)) => {
            let text = text.trim();
            if text.starts_with('-') {
                return Err(SignerError::InvalidValue);
            }
            hex_to_bytes(text).map_err(|_| SignerError::InvalidValue)?
        }
    };

    if significant.len() > MAX_VALUE_BYTES {
        return Err(SignerError::InvalidValue);
    }

    let mut out = [0u8; VALUE_LENGTH];
    out[VALUE_LENGTH - significant.len()..].copy_from_slice(&significant);
    Ok(out)
}

fn normalize_to(to: Option<&str>) -> Result<Option<Address>, SignerError> {
    let to = match to.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(to) => to,
    };
    if !is_address(to) {
        return Err(SignerError::InvalidAddress);
    }

    let lower = strip_hex_prefix(to).to_ascii_lowercase();
    let mut address = [0u8; 20];
    hex::decode_to_slice(lower, &mut address).map_err(|_| SignerError::InvalidAddress)?;
    Ok(Some(address))
}

fn normalize_valid_until_block(block: Option<&BlockNumber>) -> Result<u64, SignerError> {
    match block {
        None => Err(SignerError::MissingExpiry),
        Some(BlockNumber::Number(n)) => Ok(*n),
        Some(BlockNumber::Text(text)) => {
            let text = text.trim();
            let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                Some(digits) => u64::from_str_radix(digits, 16),
                None => text.parse::<u64>(),
            };
            parsed.map_err(|_| SignerError::MissingExpiry)
        }
    }
}

fn normalize_data(data: Option<&str>) -> Result<Vec<u8>, SignerError> {
    match data.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(data) => hex_to_bytes(data).map_err(|_| SignerError::InvalidData),
    }
}

fn normalize_version(version: Option<u32>) -> Result<u32, SignerError> {
    match version.unwrap_or(0) {
        v if v <= MAX_SUPPORTED_VERSION => Ok(v),
        v => Err(SignerError::UnsupportedVersion(v)),
    }
}
