//! # Integration Test Flows
//!
//! Caller-facing flows through `SignerService`:
//!
//! 1. **Wallet scenario**: the canonical transfer, decoded through the public
//!    protobuf schema
//! 2. **Validation boundaries**: every error kind surfaces unchanged through `sign`
//! 3. **No-key preview**: unsigned fields come back instead of hex
//! 4. **JSON input**: camelCase field bags, numeric or text, deserialize and sign
//! 5. **Concurrency**: one shared service signing from many threads

#[cfg(test)]
mod tests {
    use prost::Message;
    use signer_telemetry::{init_logging, TelemetryConfig};
    use std::sync::Arc;
    use std::thread;
    use tx_signer::domain::wire::UnverifiedTransaction;
    use tx_signer::{
        address_from_private_key, Crypto, SignOutcome, SignerError, SignerService,
        TransactionFields, TransactionSignerApi, ValueInput,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const PRIVATE_KEY: &str =
        "0x0123456789012345678901234567890123456789012345678901234567890123";
    const FROM: &str = "0x14791697260E4c9A71f18484C9f997B308e59325";
    const TO: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";

    fn quiet_logging() {
        // Another test may have installed the subscriber already
        let _ = init_logging(&TelemetryConfig {
            console_output: false,
            ..Default::default()
        });
    }

    fn transfer_fields() -> TransactionFields {
        TransactionFields {
            from: Some(FROM.to_string()),
            private_key: Some(PRIVATE_KEY.to_string()),
            quota: Some(1_000_000),
            valid_until_block: Some(999u64.into()),
            chain_id: Some(1),
            to: Some(TO.to_string()),
            value: Some(ValueInput::Number(100)),
            ..Default::default()
        }
    }

    fn sign(fields: &TransactionFields) -> Result<SignOutcome, SignerError> {
        SignerService::default().sign(fields, None)
    }

    // =============================================================================
    // WALLET SCENARIO
    // =============================================================================

    #[test]
    fn test_transfer_envelope_through_public_schema() {
        quiet_logging();

        let signed = sign(&transfer_fields()).unwrap().into_signed().unwrap();
        let envelope = UnverifiedTransaction::decode(hex::decode(&signed).unwrap().as_slice())
            .unwrap();

        assert_eq!(envelope.crypto, Crypto::Secp as i32);
        assert_eq!(envelope.signature.len(), 65);

        let tx = envelope.transaction.unwrap();
        let mut expected_value = vec![0u8; 32];
        expected_value[31] = 100;
        assert_eq!(tx.value, expected_value);
        assert_eq!(tx.quota, 1_000_000);
        assert_eq!(tx.valid_until_block, 999);
        assert_eq!(tx.chain_id, 1);
        assert_eq!(tx.version, 0);
        assert_eq!(tx.to, TO[2..].to_lowercase());
        assert_eq!(tx.nonce.len(), 10);
    }

    #[test]
    fn test_transfer_sender_matches_key() {
        let service = SignerService::default();
        let signed = service
            .sign(&transfer_fields(), None)
            .unwrap()
            .into_signed()
            .unwrap();

        let sender = service.unsign(&signed).unwrap().sender.unwrap();
        assert_eq!(sender.address, address_from_private_key(PRIVATE_KEY).unwrap());
    }

    #[test]
    fn test_generated_nonces_differ_between_calls() {
        let service = SignerService::default();
        let a = service.sign(&transfer_fields(), None).unwrap();
        let b = service.sign(&transfer_fields(), None).unwrap();

        // fresh nonce per call, so the envelopes differ
        assert_ne!(a, b);
    }

    // =============================================================================
    // VALIDATION BOUNDARIES
    // =============================================================================

    #[test]
    fn test_quota_boundary() {
        for quota in [0, -1] {
            let fields = TransactionFields {
                quota: Some(quota),
                ..transfer_fields()
            };
            assert_eq!(sign(&fields), Err(SignerError::InvalidQuota));
        }
        let fields = TransactionFields {
            quota: Some(1),
            ..transfer_fields()
        };
        assert!(sign(&fields).is_ok());
    }

    #[test]
    fn test_value_boundary() {
        let at_max = TransactionFields {
            value: Some(format!("0x{}", "ff".repeat(16)).into()),
            ..transfer_fields()
        };
        assert!(sign(&at_max).is_ok());

        let one_byte_over = TransactionFields {
            value: Some(format!("0x{}", "ff".repeat(17)).into()),
            ..transfer_fields()
        };
        assert_eq!(sign(&one_byte_over), Err(SignerError::InvalidValue));

        let negative = TransactionFields {
            value: Some(ValueInput::Number(-100)),
            ..transfer_fields()
        };
        assert_eq!(sign(&negative), Err(SignerError::InvalidValue));
    }

    #[test]
    fn test_nonce_boundary() {
        let at_limit = TransactionFields {
            nonce: Some("x".repeat(128)),
            ..transfer_fields()
        };
        assert!(sign(&at_limit).is_ok());

        let over = TransactionFields {
            nonce: Some("x".repeat(129)),
            ..transfer_fields()
        };
        assert_eq!(sign(&over), Err(SignerError::InvalidNonce));
    }

    #[test]
    fn test_address_validation() {
        let nineteen_bytes = TransactionFields {
            to: Some(format!("0x{}", "ab".repeat(19))),
            ..transfer_fields()
        };
        assert_eq!(sign(&nineteen_bytes), Err(SignerError::InvalidAddress));

        let malformed = TransactionFields {
            to: Some("0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fz".to_string()),
            ..transfer_fields()
        };
        assert_eq!(sign(&malformed), Err(SignerError::InvalidAddress));
    }

    #[test]
    fn test_required_fields() {
        let no_expiry = TransactionFields {
            valid_until_block: None,
            ..transfer_fields()
        };
        assert_eq!(sign(&no_expiry), Err(SignerError::MissingExpiry));

        let no_chain = TransactionFields {
            chain_id: None,
            ..transfer_fields()
        };
        assert_eq!(sign(&no_chain), Err(SignerError::MissingChainId));

        let bad_data = TransactionFields {
            data: Some("0xabc-".to_string()),
            ..transfer_fields()
        };
        assert_eq!(sign(&bad_data), Err(SignerError::InvalidData));

        let bad_key = TransactionFields {
            private_key: Some("0x".to_string() + &"f".repeat(64)),
            ..transfer_fields()
        };
        assert_eq!(sign(&bad_key), Err(SignerError::InvalidKey));
    }

    // =============================================================================
    // NO-KEY PREVIEW
    // =============================================================================

    #[test]
    fn test_preview_without_key() {
        quiet_logging();

        let fields = TransactionFields {
            private_key: None,
            ..transfer_fields()
        };
        let outcome = sign(&fields).unwrap();

        let SignOutcome::Preview(preview) = outcome else {
            panic!("expected unsigned preview, got {outcome:?}");
        };
        assert_eq!(preview.from.as_deref(), Some(FROM));
        assert_eq!(preview.to.as_deref(), Some(TO));
        assert_eq!(preview.quota, Some(1_000_000));
        assert_eq!(preview.value, Some(ValueInput::Number(100)));
        assert_eq!(preview.nonce.len(), 10);

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["validUntilBlock"], 999);
        assert_eq!(json["chainId"], 1);
        assert_eq!(json["version"], 0);
    }

    // =============================================================================
    // JSON INPUT
    // =============================================================================

    #[test]
    fn test_sign_from_json_field_bag() {
        let fields: TransactionFields = serde_json::from_str(&format!(
            r#"{{
                "from": "{FROM}",
                "privateKey": "{PRIVATE_KEY}",
                "nonce": "json-nonce",
                "quota": 1000000,
                "validUntilBlock": "999",
                "value": "0x64",
                "data": "0xdeadbeef",
                "to": "{TO}",
                "chainId": 1
            }}"#
        ))
        .unwrap();

        let service = SignerService::default();
        let signed = service.sign(&fields, None).unwrap().into_signed().unwrap();
        let tx = service.unsign(&signed).unwrap().transaction;

        assert_eq!(tx.nonce, "json-nonce");
        assert_eq!(tx.valid_until_block, 999);
        assert_eq!(tx.value_u128(), 100);
        assert_eq!(tx.data, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    fn json_fields(value: &str, valid_until_block: &str) -> TransactionFields {
        serde_json::from_str(&format!(
            r#"{{
                "privateKey": "{PRIVATE_KEY}",
                "quota": 1000000,
                "validUntilBlock": {valid_until_block},
                "value": {value},
                "to": "{TO}",
                "chainId": 1
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_sign_numeric_json_value() {
        let service = SignerService::default();
        let signed = service
            .sign(&json_fields("100", "999"), None)
            .unwrap()
            .into_signed()
            .unwrap();

        let envelope =
            UnverifiedTransaction::decode(hex::decode(&signed).unwrap().as_slice()).unwrap();
        let tx = envelope.transaction.unwrap();
        let mut expected_value = vec![0u8; 32];
        expected_value[31] = 100;
        assert_eq!(tx.value, expected_value);
        assert_eq!(tx.valid_until_block, 999);
    }

    #[test]
    fn test_numeric_and_text_json_forms_agree() {
        let service = SignerService::default();
        let mut numeric = json_fields("256", "999");
        let mut text = json_fields(r#""0x100""#, r#""0x3e7""#);
        numeric.nonce = Some("same".to_string());
        text.nonce = Some("same".to_string());

        assert_eq!(service.sign(&numeric, None), service.sign(&text, None));
    }

    #[test]
    fn test_negative_json_numbers_map_to_error_kinds() {
        assert_eq!(
            sign(&json_fields("-100", "999")),
            Err(SignerError::InvalidValue)
        );
        assert_eq!(
            sign(&json_fields("100", "-1")),
            Err(SignerError::MissingExpiry)
        );
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let rendered = format!("{:?}", transfer_fields());
        assert!(!rendered.contains(&PRIVATE_KEY[2..]));
        assert!(rendered.contains("<redacted>"));
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[test]
    fn test_shared_service_across_threads() {
        let service = Arc::new(SignerService::default());
        let expected = address_from_private_key(PRIVATE_KEY).unwrap();

        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let fields = TransactionFields {
                        valid_until_block: Some((1000 + i).into()),
                        ..transfer_fields()
                    };
                    let signed = service.sign(&fields, None).unwrap().into_signed().unwrap();
                    service.unsign(&signed).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let decoded = handle.join().unwrap();
            assert_eq!(decoded.transaction.valid_until_block, 1000 + i as u64);
            assert_eq!(decoded.sender.unwrap().address, expected);
        }
    }
}
