//! # Envelope Assembly
//!
//! Wraps an encoded transaction, its scheme tag and signature into an
//! `UnverifiedTransaction`, and the reverse.
//!
//! A nested protobuf message is written exactly like a `bytes` field holding
//! its encoding, so [`SignedEnvelope`] carries the transaction as the raw
//! bytes that were hashed and signed. Decoding through this view lets the
//! sender be recovered from the exact signed bytes rather than a re-encoding.

use super::entities::{DecodedTransaction, Sender, Transaction};
use super::errors::SignerError;
use super::wire::{self, Crypto};
use prost::Message;
use shared_crypto::{
    address_from_public_key, hex_to_bytes, keccak256, CryptoError, RecoverableSignature,
    Secp256k1Signer,
};

/// Wire-compatible view of `UnverifiedTransaction` with the transaction kept encoded.
#[derive(Clone, PartialEq, ::prost::Message)]
struct SignedEnvelope {
    #[prost(bytes = "vec", tag = "1")]
    transaction: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    signature: Vec<u8>,
    #[prost(enumeration = "Crypto", tag = "3")]
    crypto: i32,
}

/// Serialize the envelope and hex-encode it (lower case).
pub fn assemble(
    encoded_transaction: &[u8],
    crypto: Crypto,
    signature: &RecoverableSignature,
    hex_prefix: bool,
) -> String {
    let envelope = SignedEnvelope {
        transaction: encoded_transaction.to_vec(),
        signature: signature.to_bytes().to_vec(),
        crypto: crypto as i32,
    };

    let encoded = hex::encode(envelope.encode_to_vec());
    if hex_prefix {
        format!("0x{encoded}")
    } else {
        encoded
    }
}

/// Decode a hex envelope and, for secp256k1, recover its sender.
pub fn disassemble(
    signed: &str,
    signer: &Secp256k1Signer,
) -> Result<DecodedTransaction, SignerError> {
    let bytes = hex_to_bytes(signed.trim()).map_err(|_| SignerError::InvalidHex)?;
    let envelope = SignedEnvelope::decode(bytes.as_slice())
        .map_err(|e| SignerError::MalformedEnvelope(e.to_string()))?;

    if envelope.transaction.is_empty() {
        return Err(SignerError::MalformedEnvelope(
            "missing transaction".to_string(),
        ));
    }

    let crypto = Crypto::from_tag(envelope.crypto)?;
    let message = wire::Transaction::decode(envelope.transaction.as_slice())
        .map_err(|e| SignerError::MalformedEnvelope(e.to_string()))?;
    let transaction = Transaction::try_from(message)?;

    let sender = match crypto {
        Crypto::Secp => Some(recover_sender(
            &envelope.transaction,
            &envelope.signature,
            signer,
        )?),
        Crypto::Sm2 => None,
    };

    Ok(DecodedTransaction {
        transaction,
        crypto,
        signature: envelope.signature,
        sender,
    })
}

fn recover_sender(
    encoded_transaction: &[u8],
    signature: &[u8],
    signer: &Secp256k1Signer,
) -> Result<Sender, SignerError> {
    let signature = RecoverableSignature::from_bytes(signature).map_err(|e| {
        SignerError::MalformedEnvelope(format!("bad secp256k1 signature: {e}"))
    })?;
    let digest = keccak256(encoded_transaction);

    let public_key = signer
        .recover(&digest, &signature)
        .map_err(|e| match e {
            CryptoError::InvalidSignature => {
                SignerError::MalformedEnvelope("signature scalars out of range".to_string())
            }
            _ => SignerError::RecoveryFailed,
        })?;

    Ok(Sender {
        address: address_from_public_key(&public_key),
        public_key,
    })
}
