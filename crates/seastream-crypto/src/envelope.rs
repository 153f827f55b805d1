//! # Signed envelope wire format
//!
//! The portable JSON representation of a signed action. Field names are
//! part of the wire contract and must not change:
//!
//! ```json
//! {
//!   "primaryType": "GoLive",
//!   "domain": { "name": "...", "version": "..." },
//!   "message": {
//!     "data": { ... },
//!     "signer": "0x...",
//!     "time": 1722373018292
//!   },
//!   "signature": "0x..."
//! }
//! ```
//!
//! `signature` is the `0x`-prefixed lowercase hex of 65 raw bytes
//! (R: 32, S: 32, V: 1, with V normalized to 27/28). Envelopes round-trip
//! exactly through JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The EIP-712 domain an envelope was signed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeDomain {
    pub name: String,
    pub version: String,
}

impl EnvelopeDomain {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The signed portion of an envelope: payload map, claimed signer, and
/// signing time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMessage {
    pub data: Value,
    pub signer: String,
    pub time: i64,
}

/// A signed action as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    pub domain: EnvelopeDomain,
    pub message: EnvelopeMessage,
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SignedEnvelope {
        SignedEnvelope {
            primary_type: "GoLive".to_string(),
            domain: EnvelopeDomain::new("Seastream", "0.0.1"),
            message: EnvelopeMessage {
                data: json!({"streamer": "@a", "title": "t"}),
                signer: "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf".to_string(),
                time: 1_722_373_018_292,
            },
            signature: format!("0x{}", "ab".repeat(65)),
        }
    }

    #[test]
    fn wire_field_names_are_exact() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("primaryType").is_some());
        assert!(value["domain"].get("name").is_some());
        assert!(value["domain"].get("version").is_some());
        assert!(value["message"].get("data").is_some());
        assert!(value["message"].get("signer").is_some());
        assert!(value["message"].get("time").is_some());
        assert!(value.get("signature").is_some());
        // No leaked snake_case names.
        assert!(value.get("primary_type").is_none());
    }

    #[test]
    fn roundtrips_exactly_through_json() {
        let envelope = sample();
        let bytes = serde_json::to_vec(&envelope).unwrap();
        let back: SignedEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, envelope);
    }

    #[test]
    fn time_survives_as_i64() {
        let envelope = sample();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["message"]["time"].as_i64(), Some(1_722_373_018_292));
    }
}
