//! # Credential storage
//!
//! Filesystem persistence for per-identity credentials. Each identity
//! address owns one directory under the store root, keyed by the lowercase
//! `0x` address, with the signing certificate at `cert.pem`:
//!
//! ```text
//! <root>/0x7e5f4552091a69125d5dfcb7b8c2659029395bdf/cert.pem
//! ```
//!
//! Writes go through `create_new`, so a concurrent writer that loses the
//! race sees `AlreadyExists` and reads the winner's bytes instead of
//! truncating them.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use seastream_core::Address;

use crate::error::CryptoError;

/// File name of the signing certificate inside an identity's directory.
pub const CERT_FILE: &str = "cert.pem";

/// Storage for per-identity credential files.
pub trait CredentialStore: Send + Sync {
    /// Whether a credential exists for this identity.
    fn exists(&self, address: &Address, name: &str) -> Result<bool, CryptoError>;

    /// Read a credential's bytes.
    fn read(&self, address: &Address, name: &str) -> Result<Vec<u8>, CryptoError>;

    /// Write a credential if absent. Returns `true` if this call created
    /// the file, `false` if another writer got there first. Never
    /// overwrites.
    fn write_if_absent(
        &self,
        address: &Address,
        name: &str,
        contents: &[u8],
    ) -> Result<bool, CryptoError>;
}

/// [`CredentialStore`] over a directory tree.
#[derive(Debug, Clone)]
pub struct FsCredentialStore {
    root: PathBuf,
}

impl FsCredentialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn credential_path(&self, address: &Address, name: &str) -> PathBuf {
        self.root.join(address.to_string()).join(name)
    }
}

impl CredentialStore for FsCredentialStore {
    fn exists(&self, address: &Address, name: &str) -> Result<bool, CryptoError> {
        Ok(self.credential_path(address, name).is_file())
    }

    fn read(&self, address: &Address, name: &str) -> Result<Vec<u8>, CryptoError> {
        Ok(fs::read(self.credential_path(address, name))?)
    }

    fn write_if_absent(
        &self,
        address: &Address,
        name: &str,
        contents: &[u8],
    ) -> Result<bool, CryptoError> {
        let path = self.credential_path(address, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(contents)?;
                file.sync_all()?;
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
