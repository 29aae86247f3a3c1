//! Byte/hex conversion helpers.
//!
//! Hex text may carry a `0x`/`0X` prefix and may have odd length; odd-length
//! input is left-padded with a single `0` nibble before decoding.

use crate::CryptoError;

/// Strip a leading `0x` or `0X`, if any.
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decode hex text into bytes.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, CryptoError> {
    let digits = strip_hex_prefix(input);
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    decoded.map_err(|e| CryptoError::InvalidHex(e.to_string()))
}

/// Encode bytes as lower-case hex without prefix.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
