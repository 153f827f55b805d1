//! # Schema construction and lookup
//!
//! [`Schema::build`] turns declared shape descriptors into the immutable
//! field tables the signer and verifier hash against. Construction is
//! O(shapes × fields), happens once at startup, and every declaration
//! problem is surfaced as a [`SchemaError`] right there — nothing is
//! deferred to signing time.
//!
//! For every registered shape `Name`, two EIP-712 types exist:
//!
//! - `NameData` — the shape's own payload fields, in declaration order;
//! - `Name` — the fixed envelope type
//!   `{signer: address, time: int64, data: NameData}`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::descriptor::{FieldKind, FieldType, TypeDescriptor};
use crate::error::SchemaError;

/// A message shape that can be registered in a [`Schema`] and signed.
///
/// Implementations pair a serde-serializable struct with the descriptor
/// the schema validates. The wire names in the descriptor must match the
/// struct's JSON field names — the round-trip tests in `v0` pin this.
pub trait Payload: Serialize + DeserializeOwned {
    /// The shape name, used as the envelope's `primaryType`.
    const NAME: &'static str;

    /// The declared structure of this shape.
    fn descriptor() -> TypeDescriptor;
}

/// A validated payload field: wire name plus hashing kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    wire_name: String,
    kind: FieldKind,
}

impl Field {
    /// The JSON key this field lives under in `message.data`.
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// How this field's value is hashed.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// A validated shape: the payload field table plus derived type names.
#[derive(Debug, Clone)]
pub struct Shape {
    name: String,
    data_type_name: String,
    fields: Vec<Field>,
}

impl Shape {
    /// The shape (and envelope type) name, e.g. `GoLive`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derived payload type name, e.g. `GoLiveData`.
    pub fn data_type_name(&self) -> &str {
        &self.data_type_name
    }

    /// The payload fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// The immutable shape registry.
///
/// Read-only after [`build`](Schema::build); safe to share across threads
/// (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Schema {
    shapes: BTreeMap<String, Shape>,
}

impl Schema {
    /// Validate a list of `(name, descriptor)` declarations into a schema.
    ///
    /// Fails on the first declaration problem: a non-record shape, a field
    /// without a wire name, a field whose type has no EIP-712 mapping, or
    /// a duplicated shape name.
    pub fn build(declared: Vec<(&'static str, TypeDescriptor)>) -> Result<Self, SchemaError> {
        let mut shapes = BTreeMap::new();
        for (name, descriptor) in declared {
            let fields = match descriptor {
                TypeDescriptor::Record { fields } => fields,
                TypeDescriptor::Scalar { .. } => {
                    return Err(SchemaError::NotARecord(name.to_string()));
                }
            };

            let mut validated = Vec::with_capacity(fields.len());
            for field in fields {
                let wire_name = match field.wire_name {
                    Some(w) if !w.is_empty() => w.to_string(),
                    _ => {
                        return Err(SchemaError::MissingWireName {
                            shape: name.to_string(),
                            field: field.name.to_string(),
                        });
                    }
                };
                let kind = match field.ty {
                    FieldType::String => FieldKind::String,
                    FieldType::Int64 => FieldKind::Int64,
                    FieldType::Unsupported(ty) => {
                        return Err(SchemaError::UnsupportedFieldType {
                            shape: name.to_string(),
                            field: field.name.to_string(),
                            ty: ty.to_string(),
                        });
                    }
                };
                validated.push(Field { wire_name, kind });
            }

            let shape = Shape {
                name: name.to_string(),
                data_type_name: format!("{name}Data"),
                fields: validated,
            };
            if shapes.insert(name.to_string(), shape).is_some() {
                return Err(SchemaError::DuplicateShape(name.to_string()));
            }
        }
        Ok(Self { shapes })
    }

    /// Look up a shape by name.
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// All registered shape names, sorted.
    pub fn shape_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Export the EIP-712 `{types, domain}` table as JSON.
    ///
    /// This is the machine-readable form browser and mobile clients need
    /// to produce compatible signatures with their own EIP-712 tooling.
    pub fn typed_data_json(&self, domain_name: &str, domain_version: &str) -> Value {
        let mut types = serde_json::Map::new();
        types.insert(
            "EIP712Domain".to_string(),
            json!([
                {"name": "name", "type": "string"},
                {"name": "version", "type": "string"},
            ]),
        );
        for shape in self.shapes.values() {
            types.insert(
                shape.name().to_string(),
                json!([
                    {"name": "signer", "type": "address"},
                    {"name": "time", "type": "int64"},
                    {"name": "data", "type": shape.data_type_name()},
                ]),
            );
            let fields: Vec<Value> = shape
                .fields()
                .iter()
                .map(|f| json!({"name": f.wire_name(), "type": f.kind().type_name()}))
                .collect();
            types.insert(shape.data_type_name().to_string(), Value::Array(fields));
        }
        json!({
            "types": types,
            "domain": {"name": domain_name, "version": domain_version},
        })
    }
}
