//! # Keccak-256 digest
//!
//! Address derivation and EIP-712 struct hashing both mandate keccak-256,
//! the pre-standardization Keccak variant used by Ethereum. This is *not*
//! the same function as NIST SHA3-256 (the two differ in padding), so the
//! whole workspace goes through this one helper rather than touching
//! `sha3` directly.

use sha3::{Digest, Keccak256};

/// Compute the keccak-256 digest of `bytes`.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_matches_known_vector() {
        // keccak256("") — the well-known Ethereum empty-string digest.
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn differs_from_sha3_256() {
        // Sanity check that we are on Keccak padding, not NIST SHA-3.
        // sha3-256("") starts with a7ffc6f8.
        assert_ne!(
            hex::encode(keccak256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn known_vector_for_ascii_input() {
        // keccak256("hello") — cross-checked against the Ethereum tooling.
        assert_eq!(
            hex::encode(keccak256(b"hello")),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }
}
