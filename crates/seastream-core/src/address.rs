//! # Ethereum-style addresses
//!
//! An [`Address`] is the stable identity of a signing key: the last 20
//! bytes of `keccak256(X || Y)` over the uncompressed secp256k1 public key
//! coordinates. Two addresses are equal iff their bytes are equal, and the
//! canonical string form is `0x` followed by lowercase hex.
//!
//! Addresses are plain `Copy` values with no shared state; once
//! constructed they are immutable.

use k256::ecdsa::VerifyingKey;
use k256::{EncodedPoint, FieldBytes};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::hash::keccak256;

/// Errors from constructing an [`Address`] out of untrusted input.
#[derive(Error, Debug)]
pub enum AddressError {
    /// The input string was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded value was not exactly 20 bytes.
    #[error("address must be 20 bytes, got {0}")]
    Length(usize),

    /// The supplied coordinates are not a point on the secp256k1 curve.
    #[error("coordinates are not a point on the secp256k1 curve")]
    NotOnCurve,
}

/// A 20-byte account identity derived from a secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Derive the address of a public key.
    ///
    /// Always succeeds: any valid curve point has an address.
    pub fn from_public_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        // Skip the 0x04 uncompressed-point tag; the digest covers X || Y.
        let digest = keccak256(&point.as_bytes()[1..]);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Self(bytes)
    }

    /// Parse an address from its hex string form.
    ///
    /// Accepts an optional `0x` prefix and mixed-case hex. Fails if the
    /// string is not hex or does not decode to exactly 20 bytes.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(stripped)?;
        if decoded.len() != 20 {
            return Err(AddressError::Length(decoded.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Derive an address from raw affine coordinates.
    ///
    /// Fails with [`AddressError::NotOnCurve`] if `(x, y)` does not lie on
    /// the secp256k1 curve.
    pub fn from_coordinates(x: &[u8; 32], y: &[u8; 32]) -> Result<Self, AddressError> {
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(x),
            FieldBytes::from_slice(y),
            false,
        );
        let key = VerifyingKey::from_encoded_point(&point)
            .map_err(|_| AddressError::NotOnCurve)?;
        Ok(Self::from_public_key(&key))
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    // secp256k1 generator point, i.e. the public key of private key 1.
    const GX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GY: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    // The well-known address of private key 0x...01.
    const ADDR_OF_ONE: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf";

    fn key_one() -> SigningKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        SigningKey::from_slice(&bytes).unwrap()
    }

    #[test]
    fn derives_known_address_from_public_key() {
        let addr = Address::from_public_key(key_one().verifying_key());
        assert_eq!(addr.to_string(), ADDR_OF_ONE);
    }

    #[test]
    fn from_coordinates_matches_public_key_derivation() {
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        x.copy_from_slice(&hex::decode(GX).unwrap());
        y.copy_from_slice(&hex::decode(GY).unwrap());
        let addr = Address::from_coordinates(&x, &y).unwrap();
        assert_eq!(addr.to_string(), ADDR_OF_ONE);
    }

    #[test]
    fn from_coordinates_rejects_off_curve_point() {
        let x = [0u8; 32];
        let y = [7u8; 32];
        let err = Address::from_coordinates(&x, &y).unwrap_err();
        assert!(matches!(err, AddressError::NotOnCurve));
    }

    #[test]
    fn from_hex_roundtrip() {
        let addr = Address::from_hex(ADDR_OF_ONE).unwrap();
        assert_eq!(addr.to_string(), ADDR_OF_ONE);
    }

    #[test]
    fn from_hex_accepts_mixed_case_and_missing_prefix() {
        let checksummed = "7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
        let addr = Address::from_hex(checksummed).unwrap();
        assert_eq!(addr.to_string(), ADDR_OF_ONE);
    }

    #[test]
    fn from_hex_rejects_bad_hex() {
        assert!(matches!(
            Address::from_hex("0xzz5f4552091a69125d5dfcb7b8c2659029395bdf"),
            Err(AddressError::Hex(_))
        ));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Address::from_hex("0xdeadbeef"),
            Err(AddressError::Length(4))
        ));
    }

    #[test]
    fn equality_is_bytewise() {
        let a = Address::from_hex(ADDR_OF_ONE).unwrap();
        let b = Address::from_public_key(key_one().verifying_key());
        assert_eq!(a, b);

        let other = Address::from_hex("0x0000000000000000000000000000000000000001").unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn serde_roundtrips_as_canonical_string() {
        let addr = Address::from_hex(ADDR_OF_ONE).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{ADDR_OF_ONE}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn deserialization_rejects_malformed_strings() {
        assert!(serde_json::from_str::<Address>("\"0x1234\"").is_err());
        assert!(serde_json::from_str::<Address>("\"not hex\"").is_err());
    }

    #[test]
    fn debug_formats_as_hex() {
        let addr = Address::from_hex(ADDR_OF_ONE).unwrap();
        assert_eq!(format!("{addr:?}"), format!("Address({ADDR_OF_ONE})"));
    }
}
