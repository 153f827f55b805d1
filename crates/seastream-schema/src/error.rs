//! Schema construction errors.
//!
//! All of these are fatal at startup: a node with a bad shape declaration
//! must not come up, because every envelope it signed would hash a
//! different byte sequence than its peers expect.

use thiserror::Error;

/// Errors from [`Schema::build`](crate::Schema::build).
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A declared shape is not a record type and has no field table.
    #[error("declared shape {0:?} is not a record type")]
    NotARecord(String),

    /// A field has no wire name, so its JSON key is undefined.
    #[error("field {field:?} of shape {shape:?} has no wire name")]
    MissingWireName { shape: String, field: String },

    /// A field's type cannot be mapped to a supported EIP-712 primitive.
    ///
    /// Only `string` and `int64` are supported. Dropping the field instead
    /// would break the hash contract for the whole shape.
    #[error("field {field:?} of shape {shape:?} has unsupported type {ty} (only string and int64 can be hashed)")]
    UnsupportedFieldType {
        shape: String,
        field: String,
        ty: String,
    },

    /// The same shape name was declared twice.
    #[error("shape {0:?} declared more than once")]
    DuplicateShape(String),
}
