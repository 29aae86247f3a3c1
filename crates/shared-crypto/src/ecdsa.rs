//! # ECDSA Signatures (secp256k1)
//!
//! Recoverable secp256k1 signatures over 32-byte digests.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization, checked against the curve context on every signature
//! - Recovery ID restricted to {0, 1}
//!
//! ## Wire Layout
//!
//! `r (32 bytes, BE) || s (32 bytes, BE) || recovery id (1 byte)` = 65 bytes.

use crate::encoding::strip_hex_prefix;
use crate::hashing::Hash;
use crate::CryptoError;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n/2, the largest canonical S value.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Length of a serialized recoverable signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Length of a private key in bytes.
const PRIVATE_KEY_LENGTH: usize = 32;

// =============================================================================
// CURVE CONTEXT
// =============================================================================

/// Immutable secp256k1 parameters used for canonical-form checks.
///
/// Constructed once and held by [`Secp256k1Signer`]; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveContext {
    order: [u8; 32],
    half_order: [u8; 32],
}

impl CurveContext {
    /// The secp256k1 context.
    pub const fn secp256k1() -> Self {
        Self {
            order: SECP256K1_ORDER,
            half_order: SECP256K1_HALF_ORDER,
        }
    }

    /// Curve order n, big-endian.
    pub fn order(&self) -> &[u8; 32] {
        &self.order
    }

    /// True when `s <= n/2`.
    ///
    /// Big-endian byte arrays compare lexicographically in numeric order.
    pub fn is_low_s(&self, s: &[u8; 32]) -> bool {
        s <= &self.half_order
    }

    /// True when `0 < scalar < n`.
    pub fn is_valid_scalar(&self, scalar: &[u8; 32]) -> bool {
        scalar.iter().any(|&b| b != 0) && scalar < &self.order
    }
}

impl Default for CurveContext {
    fn default() -> Self {
        Self::secp256k1()
    }
}

// =============================================================================
// KEYS
// =============================================================================

/// Uncompressed secp256k1 public key without the `0x04` tag (64 bytes, x || y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; 64]);

impl Secp256k1PublicKey {
    /// Create from 64 raw bytes, validating the point is on the curve.
    pub fn from_bytes(bytes: [u8; 64]) -> Result<Self, CryptoError> {
        to_verifying_key(&bytes)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes (x || y).
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut bytes = [0u8; 64];
        // Uncompressed SEC1 is 0x04 || x || y
        bytes.copy_from_slice(&point.as_bytes()[1..]);
        Self(bytes)
    }
}

fn to_verifying_key(bytes: &[u8; 64]) -> Result<VerifyingKey, CryptoError> {
    let mut sec1 = [0u8; 65];
    sec1[0] = 0x04;
    sec1[1..].copy_from_slice(bytes);
    VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| CryptoError::InvalidPublicKey)
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Parse a hex private key, with or without `0x`.
    ///
    /// Keys shorter than 64 hex digits are left-padded with zeros.
    pub fn from_hex(key: &str) -> Result<Self, CryptoError> {
        let digits = strip_hex_prefix(key.trim());
        if digits.is_empty() || digits.len() > PRIVATE_KEY_LENGTH * 2 {
            return Err(CryptoError::InvalidPrivateKey);
        }

        let padded = Zeroizing::new(format!("{digits:0>64}"));
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        hex::decode_to_slice(padded.as_str(), &mut bytes[..])
            .map_err(|_| CryptoError::InvalidPrivateKey)?;

        Self::from_bytes(&bytes)
    }

    /// Get public key (uncompressed, 64 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }
}

// =============================================================================
// SIGNATURES
// =============================================================================

/// Recoverable ECDSA signature (r || s || v).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    r: [u8; 32],
    s: [u8; 32],
    v: u8,
}

impl RecoverableSignature {
    /// Build from big-endian `r` and `s` of up to 32 bytes each.
    ///
    /// Shorter components are left-padded with zeros to the full 32-byte
    /// width; a natural encoding can be a byte (or nibble) short when the
    /// leading bits are zero.
    pub fn from_parts(r: &[u8], s: &[u8], v: u8) -> Result<Self, CryptoError> {
        if v > 1 {
            return Err(CryptoError::InvalidRecoveryId(v));
        }
        Ok(Self {
            r: left_pad_32(r)?,
            s: left_pad_32(s)?,
            v,
        })
    }

    /// Parse the 65-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidSignature);
        }
        Self::from_parts(&bytes[..32], &bytes[32..64], bytes[64])
    }

    /// Serialize to the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// R component.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// S component.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Recovery ID (0 or 1).
    pub fn recovery_id(&self) -> u8 {
        self.v
    }

    fn to_k256(self) -> Result<(Signature, RecoveryId), CryptoError> {
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&self.r);
        rs[32..].copy_from_slice(&self.s);
        let sig = Signature::from_slice(&rs).map_err(|_| CryptoError::InvalidSignature)?;
        let recid = RecoveryId::from_byte(self.v).ok_or(CryptoError::InvalidRecoveryId(self.v))?;
        Ok((sig, recid))
    }
}

fn left_pad_32(component: &[u8]) -> Result<[u8; 32], CryptoError> {
    if component.len() > 32 {
        return Err(CryptoError::InvalidSignature);
    }
    let mut out = [0u8; 32];
    out[32 - component.len()..].copy_from_slice(component);
    Ok(out)
}

// =============================================================================
// SIGNER
// =============================================================================

/// Canonical secp256k1 signer.
///
/// Stateless apart from the immutable [`CurveContext`]; safe to share across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Signer {
    context: CurveContext,
}

impl Secp256k1Signer {
    /// Create a signer bound to the given curve context.
    pub fn new(context: CurveContext) -> Self {
        Self { context }
    }

    /// The curve context.
    pub fn context(&self) -> &CurveContext {
        &self.context
    }

    /// Sign a 32-byte digest, returning a low-S signature with recovery ID.
    pub fn sign_prehash(
        &self,
        digest: &Hash,
        key: &Secp256k1KeyPair,
    ) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recid) = key
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        self.canonicalize(&sig, recid)
    }

    /// Bring a recoverable signature into canonical `s <= n/2` form.
    ///
    /// k256 already emits low-S; the curve context re-checks every signature
    /// before it leaves the signer.
    fn canonicalize(
        &self,
        sig: &Signature,
        recid: RecoveryId,
    ) -> Result<RecoverableSignature, CryptoError> {
        // x >= n happens with probability ~2^-128; such ids (2, 3) have no wire form.
        if recid.is_x_reduced() {
            return Err(CryptoError::SigningFailed(
                "recovery id out of range".to_string(),
            ));
        }

        let (r, s) = sig.split_bytes();
        let mut s: [u8; 32] = s.into();
        let mut is_y_odd = recid.is_y_odd();

        // Negating s mirrors R across the x-axis, so the y-parity flips with it.
        if !self.context.is_low_s(&s) {
            let low = sig.normalize_s().ok_or(CryptoError::InvalidSignature)?;
            s = low.split_bytes().1.into();
            is_y_odd = !is_y_odd;
        }

        RecoverableSignature::from_parts(&r, &s, u8::from(is_y_odd))
    }

    /// Recover the public key that produced `signature` over `digest`.
    pub fn recover(
        &self,
        digest: &Hash,
        signature: &RecoverableSignature,
    ) -> Result<Secp256k1PublicKey, CryptoError> {
        if !self.context.is_valid_scalar(signature.r())
            || !self.context.is_valid_scalar(signature.s())
        {
            return Err(CryptoError::InvalidSignature);
        }

        let (sig, recid) = signature.to_k256()?;
        let key = VerifyingKey::recover_from_prehash(digest, &sig, recid)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(Secp256k1PublicKey::from_verifying_key(&key))
    }

    /// Verify `signature` over `digest` against `public_key`.
    ///
    /// High-S signatures are rejected even though they are mathematically valid.
    pub fn verify(
        &self,
        digest: &Hash,
        signature: &RecoverableSignature,
        public_key: &Secp256k1PublicKey,
    ) -> Result<(), CryptoError> {
        if !self.context.is_low_s(signature.s()) {
            return Err(CryptoError::InvalidSignature);
        }
        let verifying_key = to_verifying_key(public_key.as_bytes())?;
        let (sig, _) = signature.to_k256()?;
        verifying_key
            .verify_prehash(digest, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}
