//! # Identity binder
//!
//! Ties a secp256k1 identity key to its persisted signing certificate.
//! The first request for a key's certificate forges and stores it; every
//! later request (including after restart) returns the stored one, so an
//! identity keeps a single certificate for its lifetime.
//!
//! Concurrent first requests for the same identity are serialized with a
//! per-address lock held across the exists/forge/store sequence. The
//! store's `write_if_absent` is the backstop for a second process racing
//! on the same directory.

use std::sync::Arc;

use dashmap::DashMap;
use k256::ecdsa::SigningKey;
use parking_lot::Mutex;
use seastream_core::Address;

use crate::cert::{generate_certificate, parse_certificate};
use crate::error::CryptoError;
use crate::store::{CredentialStore, CERT_FILE};

/// Binds identity keys to stored certificates.
pub struct IdentityBinder<S> {
    store: S,
    creation_locks: DashMap<Address, Arc<Mutex<()>>>,
}

impl<S: CredentialStore> IdentityBinder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            creation_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored PEM for an identity, requiring valid UTF-8.
    fn read_stored_pem(&self, address: &Address) -> Result<String, CryptoError> {
        let bytes = self.store.read(address, CERT_FILE)?;
        String::from_utf8(bytes).map_err(|e| {
            CryptoError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("stored certificate for {address} is not UTF-8: {e}"),
            ))
        })
    }

    /// Return this key's certificate PEM, forging and persisting it on
    /// first use.
    pub fn get_or_create_certificate(&self, key: &SigningKey) -> Result<String, CryptoError> {
        let address = Address::from_public_key(key.verifying_key());

        let lock = {
            let entry = self.creation_locks.entry(address).or_default();
            entry.value().clone()
        };
        let _guard = lock.lock();

        if self.store.exists(&address, CERT_FILE)? {
            return self.read_stored_pem(&address);
        }

        let pem = generate_certificate(key)?;
        if self.store.write_if_absent(&address, CERT_FILE, pem.as_bytes())? {
            tracing::info!(%address, "wrote new signing certificate");
            Ok(pem)
        } else {
            // Another process created it between exists() and here.
            self.read_stored_pem(&address)
        }
    }

    /// Load a key's stored certificate and confirm it carries the key's
    /// own address.
    pub fn verify_stored_certificate(&self, key: &SigningKey) -> Result<bool, CryptoError> {
        let address = Address::from_public_key(key.verifying_key());
        if !self.store.exists(&address, CERT_FILE)? {
            return Ok(false);
        }
        let pem = self.read_stored_pem(&address)?;
        let identity = parse_certificate(&pem)?;
        Ok(identity.address == address)
    }
}
