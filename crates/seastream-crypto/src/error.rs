//! # Error types for signing, verification, and certificate forging
//!
//! Two deliberately separate hierarchies:
//!
//! - [`EnvelopeError`] — everything that can go wrong signing or verifying
//!   a typed-data envelope. `InvalidSignature` is an *authentication*
//!   failure and must never be conflated with a malformed-input `Decode`.
//! - [`CryptoError`] — certificate forging, parsing, and credential-store
//!   failures.
//!
//! Nothing here is retried internally; every error is terminal for the
//! operation that produced it and carries enough context (shape, field,
//! algorithm) to diagnose without reproducing the call.

use thiserror::Error;

/// Errors from typed-data signing and verification.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// The message shape (or an envelope's claimed `primaryType`) is not
    /// in the schema. Lists the registered shapes for diagnostics.
    #[error("unknown message type {requested:?}, expected one of [{known}]")]
    UnknownType { requested: String, known: String },

    /// Malformed envelope JSON, or a payload that does not match its
    /// declared shape.
    #[error("envelope decode error: {0}")]
    Decode(String),

    /// The signature is malformed, key recovery failed, or the recovered
    /// signer does not match the envelope. An authentication failure.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The ECDSA primitive itself failed while producing a signature.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        EnvelopeError::Decode(err.to_string())
    }
}

/// Errors from certificate forging, parsing, and storage.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// ASN.1 encoding or decoding failed (includes PEM framing).
    #[error("ASN.1 error: {0}")]
    Asn1(#[from] x509_cert::der::Error),

    /// SubjectPublicKeyInfo encoding failed.
    #[error("public key encoding error: {0}")]
    Spki(#[from] x509_cert::spki::Error),

    /// Template certificate construction failed.
    #[error("certificate builder error: {0}")]
    Builder(#[from] x509_cert::builder::Error),

    /// An ECDSA signing primitive failed.
    #[error("ECDSA error: {0}")]
    Ecdsa(#[from] k256::ecdsa::Error),

    /// The certificate's embedded public key is not on the secp256k1 curve.
    #[error("certificate public key is not a point on the secp256k1 curve")]
    NotOnCurve,

    /// The certificate's key algorithm is not ecPublicKey over secp256k1.
    #[error("unexpected certificate key algorithm: {0}")]
    WrongAlgorithm(String),

    /// Credential store I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_lists_known_shapes() {
        let err = EnvelopeError::UnknownType {
            requested: "Mystery".to_string(),
            known: "GoLive, StreamKey".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Mystery"));
        assert!(msg.contains("GoLive, StreamKey"));
    }

    #[test]
    fn serde_errors_become_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EnvelopeError::from(json_err);
        assert!(matches!(err, EnvelopeError::Decode(_)));
    }

    #[test]
    fn invalid_signature_is_distinct_from_decode() {
        let sig = EnvelopeError::InvalidSignature("truncated".to_string());
        assert!(format!("{sig}").starts_with("invalid signature"));
        let dec = EnvelopeError::Decode("bad json".to_string());
        assert!(format!("{dec}").starts_with("envelope decode error"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no cert");
        let err = CryptoError::from(io);
        assert!(format!("{err}").contains("no cert"));
    }

    #[test]
    fn wrong_algorithm_carries_the_oid() {
        let err = CryptoError::WrongAlgorithm("1.2.840.10045.3.1.7".to_string());
        assert!(format!("{err}").contains("1.2.840.10045.3.1.7"));
    }
}
