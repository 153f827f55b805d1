//! # seastream-schema — Typed-Data Shape Registry
//!
//! Declared message shapes (the structured actions a node can sign, such as
//! "this streamer went live") and the field tables EIP-712 hashing needs
//! for them.
//!
//! The registry is built **once**, eagerly validated, and immutable
//! afterwards:
//!
//! - [`TypeDescriptor`] / [`FieldDescriptor`] describe a declared shape as
//!   plain data.
//! - [`Schema::build`] turns a list of declarations into the validated
//!   field tables, rejecting non-record shapes, fields without a wire
//!   name, and fields whose type has no EIP-712 mapping. A bad declaration
//!   is a construction-time [`SchemaError`], never a runtime surprise.
//! - [`v0`] holds the fixed shape set this node ships with, plus the
//!   [`Action`](v0::Action) variant enum the signer consumes.
//!
//! Only `string` and `int64` payload fields are supported. An unsupported
//! field type fails `Schema::build` outright — silently omitting a field
//! from hashing would let two parties disagree about what was signed.

pub mod descriptor;
pub mod error;
pub mod schema;
pub mod v0;

pub use descriptor::{FieldDescriptor, FieldKind, FieldType, TypeDescriptor};
pub use error::SchemaError;
pub use schema::{Field, Payload, Schema, Shape};
