//! End-to-end envelope tests, including a fixture produced by an
//! independent EIP-712 implementation to pin cross-stack compatibility.

use std::sync::Arc;

use k256::ecdsa::SigningKey;
use proptest::prelude::*;
use seastream_crypto::{EnvelopeDomain, EnvelopeError, TypedDataSigner, TypedDataVerifier};
use seastream_schema::v0::{self, Action, GoLive, StreamKey};

/// Envelope signed by an unrelated (Go, go-ethereum based) implementation.
/// If this stops verifying, our hashing diverged from the ecosystem.
const INTEROP_ENVELOPE: &str = r#"{
    "primaryType": "GoLive",
    "domain": { "name": "Aquareum", "version": "0.0.1" },
    "message": {
        "data": { "streamer": "@aquareum.tv", "title": "Let's gooooooo!" },
        "signer": "0x295481766F43bb048Aec5D71f3Bf76FDaCEA78f2",
        "time": 1722373018292
    },
    "signature": "0x1723aa5ffb04a6ade0acb84c5ce15c804141ac06fd4ae0a867655d1b2f9e130e1ceb659297d262281795b49c191e6f67623d538890b4454eeaa1b6c2da0668e81b"
}"#;

fn interop_verifier() -> TypedDataVerifier {
    TypedDataVerifier::new(
        Arc::new(v0::schema().unwrap()),
        EnvelopeDomain::new("Aquareum", "0.0.1"),
    )
}

fn signer_with_key(fill: u8) -> TypedDataSigner {
    let mut bytes = [0u8; 32];
    bytes[31] = fill;
    TypedDataSigner::new(
        Arc::new(v0::schema().unwrap()),
        EnvelopeDomain::new("Seastream", "0.0.1"),
        SigningKey::from_slice(&bytes).unwrap(),
    )
}

#[test]
fn verifies_foreign_implementation_envelope() {
    let verified = interop_verifier()
        .verify(INTEROP_ENVELOPE.as_bytes())
        .unwrap();

    assert_eq!(
        verified.signer.to_string(),
        "0x295481766f43bb048aec5d71f3bf76fdacea78f2"
    );
    assert_eq!(verified.time, 1_722_373_018_292);
    assert_eq!(
        verified.payload,
        Action::GoLive(GoLive {
            streamer: "@aquareum.tv".into(),
            title: "Let's gooooooo!".into(),
        })
    );
}

#[test]
fn foreign_envelope_fails_under_our_domain() {
    let verifier = TypedDataVerifier::new(
        Arc::new(v0::schema().unwrap()),
        EnvelopeDomain::new("Seastream", "0.0.1"),
    );
    assert!(matches!(
        verifier.verify(INTEROP_ENVELOPE.as_bytes()).unwrap_err(),
        EnvelopeError::InvalidSignature(_)
    ));
}

#[test]
fn tampered_foreign_envelope_is_rejected() {
    let tampered = INTEROP_ENVELOPE.replace("Let's gooooooo!", "Something else");
    assert!(matches!(
        interop_verifier().verify(tampered.as_bytes()).unwrap_err(),
        EnvelopeError::InvalidSignature(_)
    ));
}

#[test]
fn envelopes_travel_between_signer_instances() {
    // One node signs, a different node (same schema and domain) verifies.
    let alice = signer_with_key(1);
    let bob = signer_with_key(2);

    let raw = alice
        .sign_at(
            &Action::StreamKey(StreamKey {
                authorized: bob.address().to_string(),
            }),
            1_722_373_018_292,
        )
        .unwrap();

    let verified = bob.verifier().verify(&raw).unwrap();
    assert_eq!(verified.signer, alice.address());
    assert_eq!(
        verified.payload,
        Action::StreamKey(StreamKey {
            authorized: bob.address().to_string(),
        })
    );
}

proptest! {
    #[test]
    fn any_golive_round_trips(streamer in ".*", title in ".*", time in any::<i64>()) {
        let signer = signer_with_key(1);
        let action = Action::GoLive(GoLive { streamer, title });
        let raw = signer.sign_at(&action, time).unwrap();

        let verified = signer.verify(&raw).unwrap();
        prop_assert_eq!(verified.payload, action);
        prop_assert_eq!(verified.time, time);
        prop_assert_eq!(verified.signer, signer.address());
    }

    #[test]
    fn distinct_payloads_never_share_a_signature(title_a in ".+", title_b in ".+") {
        prop_assume!(title_a != title_b);
        let signer = signer_with_key(1);
        let make = |title: &str| {
            signer
                .sign_at(
                    &Action::GoLive(GoLive {
                        streamer: "@p".into(),
                        title: title.into(),
                    }),
                    0,
                )
                .unwrap()
        };

        let a: serde_json::Value = serde_json::from_slice(&make(&title_a)).unwrap();
        let b: serde_json::Value = serde_json::from_slice(&make(&title_b)).unwrap();
        prop_assert_ne!(&a["signature"], &b["signature"]);
    }
}
