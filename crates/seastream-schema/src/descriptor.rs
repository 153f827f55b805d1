//! # Shape descriptors
//!
//! Plain-data descriptions of declared message shapes. These replace the
//! runtime reflection the scheme is usually built with: a shape says up
//! front what its fields are called on the wire and which primitive kind
//! each one hashes as, and [`Schema::build`](crate::Schema::build)
//! validates the whole set eagerly.

/// The EIP-712 primitive kinds a payload field may hash as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string; hashes as `keccak256(utf8 bytes)`.
    String,
    /// Signed 64-bit integer; hashes as a 32-byte big-endian
    /// two's-complement value.
    Int64,
}

impl FieldKind {
    /// The EIP-712 type name used in canonical type signatures.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int64 => "int64",
        }
    }
}

/// The declared type of a shape field, before validation.
///
/// `Unsupported` carries the declared type's name so the construction
/// error can say exactly which field cannot be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int64,
    Unsupported(&'static str),
}

/// One field of a declared record shape.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The declared (source-level) field name, used in diagnostics.
    pub name: &'static str,
    /// The JSON key this field serializes under. `None` means the
    /// declaration forgot one, which fails schema construction.
    pub wire_name: Option<&'static str>,
    /// The declared field type.
    pub ty: FieldType,
}

impl FieldDescriptor {
    /// A string field whose wire name matches its declared name.
    pub fn string(name: &'static str) -> Self {
        Self {
            name,
            wire_name: Some(name),
            ty: FieldType::String,
        }
    }

    /// An int64 field whose wire name matches its declared name.
    pub fn int64(name: &'static str) -> Self {
        Self {
            name,
            wire_name: Some(name),
            ty: FieldType::Int64,
        }
    }
}

/// The declared structure of a shape.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// A record with an ordered field list — the only kind that can be
    /// registered successfully.
    Record { fields: Vec<FieldDescriptor> },
    /// Anything that is not a record (named so the error can say what it
    /// was). Registering one fails with
    /// [`SchemaError::NotARecord`](crate::SchemaError::NotARecord).
    Scalar { type_name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_type_names() {
        assert_eq!(FieldKind::String.type_name(), "string");
        assert_eq!(FieldKind::Int64.type_name(), "int64");
    }

    #[test]
    fn shorthand_constructors_set_wire_name() {
        let f = FieldDescriptor::string("streamer");
        assert_eq!(f.name, "streamer");
        assert_eq!(f.wire_name, Some("streamer"));
        assert_eq!(f.ty, FieldType::String);

        let g = FieldDescriptor::int64("count");
        assert_eq!(g.ty, FieldType::Int64);
    }
}
