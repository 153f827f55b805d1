//! # v0 shape set
//!
//! The fixed set of structured actions this node signs today, plus the
//! [`Action`] variant enum the signer consumes. Adding a shape means
//! adding a struct, an [`Action`] variant, and a line in [`schema`] — the
//! registry stays closed and statically known.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::error::SchemaError;
use crate::schema::{Payload, Schema};

/// A streamer goes live with a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoLive {
    pub streamer: String,
    pub title: String,
}

impl Payload for GoLive {
    const NAME: &'static str = "GoLive";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Record {
            fields: vec![
                FieldDescriptor::string("streamer"),
                FieldDescriptor::string("title"),
            ],
        }
    }
}

/// Grant of a stream key to an authorized address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamKey {
    pub authorized: String,
}

impl Payload for StreamKey {
    const NAME: &'static str = "StreamKey";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Record {
            fields: vec![FieldDescriptor::string("authorized")],
        }
    }
}

/// A signable action — the tagged union of every v0 shape.
///
/// The signer takes an `Action`, so the shape is known statically and the
/// only remaining unknown-type failure mode is an envelope claiming a
/// `primaryType` that was never registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GoLive(GoLive),
    StreamKey(StreamKey),
}

impl Action {
    /// The registered shape name for this variant.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Action::GoLive(_) => GoLive::NAME,
            Action::StreamKey(_) => StreamKey::NAME,
        }
    }

    /// Flatten the payload into a generic JSON map keyed by wire names.
    pub fn to_data_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Action::GoLive(inner) => serde_json::to_value(inner),
            Action::StreamKey(inner) => serde_json::to_value(inner),
        }
    }

    /// Reconstruct a typed payload from a shape name and its data map.
    ///
    /// Returns `Ok(None)` if the shape name is not a v0 action; a serde
    /// error if the data does not match the shape (missing field, wrong
    /// JSON type).
    pub fn from_data_value(
        shape_name: &str,
        data: &Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        Ok(Some(match shape_name {
            GoLive::NAME => Action::GoLive(serde_json::from_value(data.clone())?),
            StreamKey::NAME => Action::StreamKey(serde_json::from_value(data.clone())?),
            _ => return Ok(None),
        }))
    }
}

/// Build the schema for the v0 shape set.
pub fn schema() -> Result<Schema, SchemaError> {
    Schema::build(vec![
        (GoLive::NAME, GoLive::descriptor()),
        (StreamKey::NAME, StreamKey::descriptor()),
    ])
}
