//! # Account Addresses
//!
//! 20-byte addresses: the last 20 bytes of Keccak-256 over the uncompressed
//! public key (without the `0x04` tag). Textual addresses follow EIP-55
//! mixed-case checksumming.

use crate::ecdsa::Secp256k1PublicKey;
use crate::encoding::strip_hex_prefix;
use crate::hashing::keccak256;

/// Account address.
pub type Address = [u8; 20];

/// Derive the account address of a public key.
pub fn address_from_public_key(public_key: &Secp256k1PublicKey) -> Address {
    let hash = keccak256(public_key.as_bytes());
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Check whether `input` is a textual address.
///
/// Accepts 40 hex digits with an optional `0x` prefix. All-lower-case and
/// all-upper-case forms carry no checksum and are accepted as is; mixed case
/// must match the EIP-55 checksum.
pub fn is_address(input: &str) -> bool {
    let digits = strip_hex_prefix(input);
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    digits == checksum_digits(&digits.to_ascii_lowercase())
}

/// Render an address in EIP-55 checksum form, `0x`-prefixed.
pub fn to_checksum_address(address: &Address) -> String {
    format!("0x{}", checksum_digits(&hex::encode(address)))
}

/// Apply EIP-55 casing to 40 lower-case hex digits.
fn checksum_digits(lower: &str) -> String {
    let hash = hex::encode(keccak256(lower.as_bytes()));
    lower
        .chars()
        .zip(hash.chars())
        .map(|(c, h)| {
            // 8..f in the hash nibble upper-cases the letter
            if c.is_ascii_alphabetic() && h.to_digit(16).unwrap_or(0) >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}
