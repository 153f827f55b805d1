//! # EIP-712 struct hashing
//!
//! The hashing half of the typed-data scheme: canonical type signatures,
//! per-field value encoding, the domain separator, and the final
//! `0x19 0x01`-framed signing hash. No signing or key material here —
//! everything is a pure function of the schema and the payload values, so
//! signer and verifier recompute identical digests from the same inputs.
//!
//! Struct hash = `keccak256(typeHash || encoded field values)` where
//!
//! - typeHash = `keccak256(canonical type signature)`, the canonical
//!   signature being the envelope type followed by the referenced data
//!   type in order of first occurrence;
//! - strings hash as `keccak256(utf8)`;
//! - int64 values encode as 32-byte big-endian two's complement;
//! - addresses left-zero-pad their 20 bytes to 32;
//! - the nested payload struct contributes its own struct hash.

use seastream_core::{keccak256, Address};
use seastream_schema::{FieldKind, Shape};
use serde_json::Value;

use crate::error::EnvelopeError;

/// Canonical signature of the fixed two-field domain type.
pub const DOMAIN_TYPE_SIGNATURE: &str = "EIP712Domain(string name,string version)";

/// Canonical signature of a shape's payload type, e.g.
/// `GoLiveData(string streamer,string title)`.
fn data_type_signature(shape: &Shape) -> String {
    let fields: Vec<String> = shape
        .fields()
        .iter()
        .map(|f| format!("{} {}", f.kind().type_name(), f.wire_name()))
        .collect();
    format!("{}({})", shape.data_type_name(), fields.join(","))
}

/// Canonical signature of a shape's envelope type with its referenced
/// data type appended, e.g.
/// `GoLive(address signer,int64 time,GoLiveData data)GoLiveData(...)`.
fn envelope_type_signature(shape: &Shape) -> String {
    format!(
        "{}(address signer,int64 time,{} data){}",
        shape.name(),
        shape.data_type_name(),
        data_type_signature(shape)
    )
}

/// 32-byte big-endian two's-complement encoding of an `int64`.
fn encode_int64(value: i64) -> [u8; 32] {
    let mut word = if value < 0 { [0xff; 32] } else { [0u8; 32] };
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Left-zero-padded 32-byte encoding of an address.
fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encode one payload field from the generic data map.
fn encode_field(
    shape: &Shape,
    wire_name: &str,
    kind: FieldKind,
    data: &Value,
) -> Result<[u8; 32], EnvelopeError> {
    let value = data.get(wire_name).ok_or_else(|| {
        EnvelopeError::Decode(format!(
            "shape {} data is missing field {wire_name:?}",
            shape.name()
        ))
    })?;
    match kind {
        FieldKind::String => {
            let s = value.as_str().ok_or_else(|| {
                EnvelopeError::Decode(format!(
                    "field {wire_name:?} of shape {} must be a string",
                    shape.name()
                ))
            })?;
            Ok(keccak256(s.as_bytes()))
        }
        FieldKind::Int64 => {
            let n = value.as_i64().ok_or_else(|| {
                EnvelopeError::Decode(format!(
                    "field {wire_name:?} of shape {} must be an int64",
                    shape.name()
                ))
            })?;
            Ok(encode_int64(n))
        }
    }
}

/// Struct hash of a shape's payload map against its data type.
fn data_struct_hash(shape: &Shape, data: &Value) -> Result<[u8; 32], EnvelopeError> {
    if !data.is_object() {
        return Err(EnvelopeError::Decode(format!(
            "shape {} data must be a JSON object",
            shape.name()
        )));
    }
    let mut preimage = Vec::with_capacity(32 * (shape.fields().len() + 1));
    preimage.extend_from_slice(&keccak256(data_type_signature(shape).as_bytes()));
    for field in shape.fields() {
        preimage.extend_from_slice(&encode_field(shape, field.wire_name(), field.kind(), data)?);
    }
    Ok(keccak256(&preimage))
}

/// Struct hash of the full envelope message
/// `{signer, time, data}` against the shape's envelope type.
pub fn message_struct_hash(
    shape: &Shape,
    signer: &Address,
    time: i64,
    data: &Value,
) -> Result<[u8; 32], EnvelopeError> {
    let mut preimage = Vec::with_capacity(32 * 4);
    preimage.extend_from_slice(&keccak256(envelope_type_signature(shape).as_bytes()));
    preimage.extend_from_slice(&encode_address(signer));
    preimage.extend_from_slice(&encode_int64(time));
    preimage.extend_from_slice(&data_struct_hash(shape, data)?);
    Ok(keccak256(&preimage))
}

/// Struct hash of the constant `EIP712Domain {name, version}` record.
pub fn domain_separator(name: &str, version: &str) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(96);
    preimage.extend_from_slice(&keccak256(DOMAIN_TYPE_SIGNATURE.as_bytes()));
    preimage.extend_from_slice(&keccak256(name.as_bytes()));
    preimage.extend_from_slice(&keccak256(version.as_bytes()));
    keccak256(&preimage)
}

/// The 32-byte digest that actually gets signed:
/// `keccak256(0x19 0x01 || domainSeparator || structHash)`.
pub fn signing_hash(domain_separator: &[u8; 32], struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(66);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(domain_separator);
    preimage.extend_from_slice(struct_hash);
    keccak256(&preimage)
}
