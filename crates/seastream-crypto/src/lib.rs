//! # seastream-crypto
//!
//! The node's signing identity: EIP-712 typed-data envelopes over the
//! shapes registered in `seastream-schema`, and the forged secp256k1
//! X.509 certificate that carries the same key into media toolchains.
//!
//! ## Layout
//!
//! - [`eip712`] — canonical type signatures, struct hashing, and the
//!   framed signing digest
//! - [`envelope`] — the signed JSON wire format
//! - [`signer`] — [`TypedDataSigner`] / [`TypedDataVerifier`]
//! - [`cert`] — certificate forging and parsing
//! - [`store`] — per-identity credential persistence
//! - [`binder`] — get-or-create binding of keys to stored certificates

pub mod binder;
pub mod cert;
pub mod eip712;
pub mod envelope;
pub mod error;
pub mod signer;
pub mod store;

pub use binder::IdentityBinder;
pub use cert::{generate_certificate, parse_certificate, CertificateIdentity};
pub use envelope::{EnvelopeDomain, EnvelopeMessage, SignedEnvelope};
pub use error::{CryptoError, EnvelopeError};
pub use signer::{TypedDataSigner, TypedDataVerifier, VerifiedMessage};
pub use store::{CredentialStore, FsCredentialStore, CERT_FILE};
