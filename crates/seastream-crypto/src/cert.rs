//! # secp256k1 certificate forging
//!
//! X.509 tooling in the Rust ecosystem (and most TLS stacks) will build
//! and sign certificates for NIST P-256 but not for secp256k1. We need a
//! certificate that carries the node's secp256k1 identity key anyway, so
//! we forge one in two steps:
//!
//! 1. build a perfectly ordinary self-signed P-256 certificate whose
//!    subject, validity, and extensions are already the ones we want;
//! 2. swap its `SubjectPublicKeyInfo` for the secp256k1 key, re-encode the
//!    TBS structure, and re-sign it with the secp256k1 key itself.
//!
//! All surgery happens on the decoded ASN.1 types, never on raw DER
//! bytes, so the result is a structurally valid certificate whose only
//! unusual property is its curve.
//!
//! The forged certificate claims `ecdsa-with-SHA256` as its signature
//! algorithm while the signature is actually secp256k1 ECDSA over
//! SHA-256. Standard validators reject it; [`parse_certificate`] is the
//! matching reader.

use std::str::FromStr;
use std::time::Duration;

use const_oid::db::{rfc5280, rfc5912};
use const_oid::AssociatedOid;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{SigningKey, VerifyingKey};
use rand_core::{OsRng, RngCore};
use seastream_core::Address;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::der::asn1::{BitString, ObjectIdentifier, OctetString};
use x509_cert::der::{Any, DecodePem, Encode, EncodePem};
use x509_cert::ext::pkix::{
    AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, KeyUsage, KeyUsages,
    SubjectKeyIdentifier,
};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::time::Validity;
use x509_cert::Certificate;

use crate::error::CryptoError;

/// Identity keys are long-lived; expiry would only add a failure mode.
const VALIDITY_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// The identity a certificate carries, as recovered by
/// [`parse_certificate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateIdentity {
    pub key: VerifyingKey,
    pub address: Address,
}

/// Random positive 16-byte serial.
fn random_serial() -> Result<SerialNumber, CryptoError> {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    // DER serials are signed integers; keep it positive.
    bytes[0] &= 0x7f;
    Ok(SerialNumber::new(&bytes)?)
}

/// RFC 7093 method 1 key identifier: SHA-1 of the uncompressed point.
fn key_identifier(key: &VerifyingKey) -> Vec<u8> {
    Sha1::digest(key.to_encoded_point(false).as_bytes()).to_vec()
}

/// Build the self-signed P-256 template carrying the final subject and
/// extensions. Its key and signature are placeholders for the surgery.
fn p256_template(address: &Address, key_id: &[u8]) -> Result<Certificate, CryptoError> {
    let template_key = p256::ecdsa::SigningKey::random(&mut OsRng);
    let spki_der = {
        use p256::pkcs8::EncodePublicKey;
        template_key.verifying_key().to_public_key_der()?
    };
    let spki = SubjectPublicKeyInfoOwned::try_from(spki_der.as_bytes())?;

    let subject = Name::from_str(&format!("CN={address}"))?;
    let validity = Validity::from_now(Duration::from_secs(VALIDITY_SECS))?;

    let mut builder = CertificateBuilder::new(
        Profile::Manual { issuer: None },
        random_serial()?,
        validity,
        subject,
        spki,
        &template_key,
    )?;
    builder.add_extension(&KeyUsage(KeyUsages::DigitalSignature.into()))?;
    builder.add_extension(&ExtendedKeyUsage(vec![rfc5280::ID_KP_EMAIL_PROTECTION]))?;
    builder.add_extension(&BasicConstraints {
        ca: false,
        path_len_constraint: None,
    })?;
    builder.add_extension(&SubjectKeyIdentifier(OctetString::new(key_id)?))?;
    builder.add_extension(&AuthorityKeyIdentifier {
        key_identifier: Some(OctetString::new(key_id)?),
        authority_cert_issuer: None,
        authority_cert_serial_number: None,
    })?;

    Ok(builder.build::<p256::ecdsa::DerSignature>()?)
}

/// Forge a self-signed certificate for a secp256k1 identity key.
///
/// Returns the certificate as PEM. The subject common name is the key's
/// lowercase `0x` address, and the subject/authority key identifiers are
/// the SHA-1 of the uncompressed point, so the certificate is fully bound
/// to the key before the template is even built.
pub fn generate_certificate(key: &SigningKey) -> Result<String, CryptoError> {
    let verifying = key.verifying_key();
    let address = Address::from_public_key(verifying);
    let key_id = key_identifier(verifying);

    let template = p256_template(&address, &key_id)?;

    let mut tbs = template.tbs_certificate.clone();
    tbs.subject_public_key_info = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: rfc5912::ID_EC_PUBLIC_KEY,
            parameters: Some(Any::encode_from(&k256::Secp256k1::OID)?),
        },
        subject_public_key: BitString::from_bytes(verifying.to_encoded_point(false).as_bytes())?,
    };

    let tbs_der = tbs.to_der()?;
    let digest = Sha256::digest(&tbs_der);
    let signature: k256::ecdsa::Signature = key.sign_prehash(&digest)?;

    let certificate = Certificate {
        tbs_certificate: tbs,
        signature_algorithm: template.signature_algorithm,
        signature: BitString::from_bytes(signature.to_der().as_bytes())?,
    };
    Ok(certificate.to_pem(x509_cert::der::pem::LineEnding::LF)?)
}

/// Read a forged certificate back into the identity it carries.
///
/// Checks that the key algorithm is `ecPublicKey` over secp256k1 and that
/// the embedded point is on the curve; everything else about the
/// certificate is taken at face value.
pub fn parse_certificate(pem: &str) -> Result<CertificateIdentity, CryptoError> {
    let certificate = Certificate::from_pem(pem.as_bytes())?;
    let spki = &certificate.tbs_certificate.subject_public_key_info;

    if spki.algorithm.oid != rfc5912::ID_EC_PUBLIC_KEY {
        return Err(CryptoError::WrongAlgorithm(spki.algorithm.oid.to_string()));
    }
    let curve = spki
        .algorithm
        .parameters
        .as_ref()
        .and_then(|params| params.decode_as::<ObjectIdentifier>().ok())
        .ok_or_else(|| CryptoError::WrongAlgorithm("missing curve parameters".to_string()))?;
    if curve != k256::Secp256k1::OID {
        return Err(CryptoError::WrongAlgorithm(curve.to_string()));
    }

    let point = spki
        .subject_public_key
        .as_bytes()
        .ok_or(CryptoError::NotOnCurve)?;
    let key = VerifyingKey::from_sec1_bytes(point).map_err(|_| CryptoError::NotOnCurve)?;
    let address = Address::from_public_key(&key);
    Ok(CertificateIdentity { key, address })
}
