//! # Round-Trip Properties
//!
//! For generated field sets and keys:
//!
//! 1. **Round-trip**: `unsign(sign(f, k))` reproduces every transaction field
//! 2. **Signature validity**: the recovered key verifies over the digest and
//!    maps to the signing key's address
//! 3. **Canonical form**: `s <= n/2`, recovery id in {0, 1}
//! 4. **Determinism**: fixed fields and key give identical envelopes

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_crypto::{
        to_checksum_address, CurveContext, RecoverableSignature, Secp256k1KeyPair,
        Secp256k1Signer,
    };
    use tx_signer::{
        address_from_private_key, transaction_hash, BlockNumber, Crypto, SignerService,
        TransactionFields, TransactionSignerApi, ValueInput,
    };

    // =============================================================================
    // STRATEGIES
    // =============================================================================

    fn key_strategy() -> impl Strategy<Value = String> {
        any::<[u8; 32]>()
            .prop_filter("scalar in [1, n)", |bytes| {
                Secp256k1KeyPair::from_bytes(bytes).is_ok()
            })
            .prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
    }

    fn recipient_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            any::<[u8; 20]>().prop_map(|a| Some(to_checksum_address(&a))),
            any::<[u8; 20]>().prop_map(|a| Some(hex::encode(a))),
        ]
    }

    fn fields_strategy() -> impl Strategy<Value = TransactionFields> {
        (
            "[a-zA-Z0-9]{1,128}",
            1..=i64::MAX,
            any::<u64>(),
            any::<u128>(),
            proptest::collection::vec(any::<u8>(), 0..256),
            recipient_strategy(),
            any::<u32>(),
            0u32..=1,
        )
            .prop_map(
                |(nonce, quota, valid_until_block, value, data, to, chain_id, version)| {
                    TransactionFields {
                        nonce: Some(nonce),
                        quota: Some(quota),
                        valid_until_block: Some(valid_until_block.into()),
                        value: Some(value.into()),
                        data: Some(format!("0x{}", hex::encode(data))),
                        to,
                        chain_id: Some(chain_id),
                        version: Some(version),
                        ..Default::default()
                    }
                },
            )
    }

    fn sign(service: &SignerService, fields: &TransactionFields, key: &str) -> String {
        service
            .sign(fields, Some(key))
            .unwrap()
            .into_signed()
            .unwrap()
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_unsign_inverts_sign(fields in fields_strategy(), key in key_strategy()) {
            let service = SignerService::default();
            let decoded = service.unsign(&sign(&service, &fields, &key)).unwrap();
            let tx = decoded.transaction;

            prop_assert_eq!(Some(tx.nonce.as_str()), fields.nonce.as_deref());
            prop_assert_eq!(Some(tx.quota as i64), fields.quota);
            prop_assert_eq!(
                Some(BlockNumber::Number(tx.valid_until_block)),
                fields.valid_until_block
            );
            prop_assert_eq!(Some(ValueInput::from(tx.value_u128())), fields.value);
            prop_assert_eq!(Some(format!("0x{}", hex::encode(&tx.data))), fields.data);
            prop_assert_eq!(
                tx.to_hex(),
                fields.to.as_deref().map(|t| t.trim_start_matches("0x").to_lowercase())
            );
            prop_assert_eq!(Some(tx.chain_id), fields.chain_id);
            prop_assert_eq!(Some(tx.version), fields.version);
            prop_assert_eq!(decoded.crypto, Crypto::Secp);
        }

        #[test]
        fn test_recovered_sender_verifies(fields in fields_strategy(), key in key_strategy()) {
            let service = SignerService::default();
            let decoded = service.unsign(&sign(&service, &fields, &key)).unwrap();
            let sender = decoded.sender.unwrap();
            let signature = RecoverableSignature::from_bytes(&decoded.signature).unwrap();

            prop_assert_eq!(sender.address, address_from_private_key(&key).unwrap());
            prop_assert_eq!(
                sender.public_key,
                Secp256k1KeyPair::from_hex(&key).unwrap().public_key()
            );
            prop_assert!(Secp256k1Signer::default()
                .verify(&transaction_hash(&decoded.transaction), &signature, &sender.public_key)
                .is_ok());
        }

        #[test]
        fn test_signatures_are_canonical(fields in fields_strategy(), key in key_strategy()) {
            let service = SignerService::default();
            let signature = service.unsign(&sign(&service, &fields, &key)).unwrap().signature;

            prop_assert_eq!(signature.len(), 65);
            let parsed = RecoverableSignature::from_bytes(&signature).unwrap();
            prop_assert!(CurveContext::secp256k1().is_low_s(parsed.s()));
            prop_assert!(parsed.recovery_id() <= 1);
        }

        #[test]
        fn test_fixed_input_gives_identical_envelopes(
            fields in fields_strategy(),
            key in key_strategy(),
        ) {
            let service = SignerService::default();
            let first = sign(&service, &fields, &key);

            prop_assert_eq!(sign(&service, &fields, &key), first);
        }
    }
}
