//! # Typed-data signer and verifier
//!
//! [`TypedDataSigner`] turns an [`Action`] into a self-describing signed
//! JSON envelope; [`TypedDataVerifier`] checks an envelope from any peer
//! and hands back the typed payload with the proven signer address.
//!
//! Verification is recovery-based: the secp256k1 public key is recovered
//! from the signature and digest, its address is derived, and the claim in
//! `message.signer` must match. The verifier hashes against its own
//! configured domain, so an envelope signed under a different domain name
//! or version fails as an invalid signature rather than being accepted.
//!
//! Authorization is out of scope here. A verified envelope proves *who*
//! signed *what* and *when they said it was* — whether that address is
//! allowed to perform the action is the caller's decision.

use std::sync::Arc;

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use seastream_core::{now_millis, Address};
use seastream_schema::v0::Action;
use seastream_schema::{Schema, Shape};
use serde_json::Value;

use crate::eip712;
use crate::envelope::{EnvelopeDomain, EnvelopeMessage, SignedEnvelope};
use crate::error::EnvelopeError;

/// A message accepted by [`TypedDataVerifier::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedMessage {
    /// The address recovered from the signature.
    pub signer: Address,
    /// The signer's claimed timestamp, milliseconds since the Unix epoch.
    pub time: i64,
    /// The typed payload.
    pub payload: Action,
}

/// Stateless envelope verification against a schema and domain.
#[derive(Debug, Clone)]
pub struct TypedDataVerifier {
    schema: Arc<Schema>,
    domain: EnvelopeDomain,
}

impl TypedDataVerifier {
    pub fn new(schema: Arc<Schema>, domain: EnvelopeDomain) -> Self {
        Self { schema, domain }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn domain(&self) -> &EnvelopeDomain {
        &self.domain
    }

    fn shape(&self, name: &str) -> Result<&Shape, EnvelopeError> {
        self.schema.get(name).ok_or_else(|| EnvelopeError::UnknownType {
            requested: name.to_string(),
            known: self.schema.shape_names().collect::<Vec<_>>().join(", "),
        })
    }

    /// The digest a signature over this message must cover.
    fn signing_digest(
        &self,
        shape: &Shape,
        signer: &Address,
        time: i64,
        data: &Value,
    ) -> Result<[u8; 32], EnvelopeError> {
        let separator = eip712::domain_separator(&self.domain.name, &self.domain.version);
        let struct_hash = eip712::message_struct_hash(shape, signer, time, data)?;
        Ok(eip712::signing_hash(&separator, &struct_hash))
    }

    /// Check a serialized envelope and return its typed contents.
    ///
    /// Fails if the JSON is malformed, the `primaryType` is not registered,
    /// the signature is not a well-formed 65-byte recoverable signature, or
    /// the recovered address does not match the claimed signer.
    pub fn verify(&self, raw: &[u8]) -> Result<VerifiedMessage, EnvelopeError> {
        let envelope: SignedEnvelope = serde_json::from_slice(raw)?;
        let shape = self.shape(&envelope.primary_type)?;

        let claimed = Address::from_hex(&envelope.message.signer).map_err(|e| {
            EnvelopeError::Decode(format!(
                "envelope signer {:?} is not an address: {e}",
                envelope.message.signer
            ))
        })?;

        let digest =
            self.signing_digest(shape, &claimed, envelope.message.time, &envelope.message.data)?;

        let sig_bytes = hex::decode(envelope.signature.trim_start_matches("0x"))
            .map_err(|e| EnvelopeError::InvalidSignature(format!("signature is not hex: {e}")))?;
        if sig_bytes.len() != 65 {
            return Err(EnvelopeError::InvalidSignature(format!(
                "expected 65 signature bytes, got {}",
                sig_bytes.len()
            )));
        }

        let mut v = sig_bytes[64];
        if v >= 27 {
            v -= 27;
        }
        let recovery = RecoveryId::from_byte(v).ok_or_else(|| {
            EnvelopeError::InvalidSignature(format!("invalid recovery byte {}", sig_bytes[64]))
        })?;
        let signature = Signature::from_slice(&sig_bytes[..64])
            .map_err(|e| EnvelopeError::InvalidSignature(e.to_string()))?;

        let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery)
            .map_err(|e| EnvelopeError::InvalidSignature(e.to_string()))?;
        let recovered = Address::from_public_key(&key);
        if recovered != claimed {
            return Err(EnvelopeError::InvalidSignature(format!(
                "recovered signer {recovered} does not match claimed signer {claimed}"
            )));
        }

        let payload = Action::from_data_value(&envelope.primary_type, &envelope.message.data)?
            .ok_or_else(|| EnvelopeError::UnknownType {
                requested: envelope.primary_type.clone(),
                known: self.schema.shape_names().collect::<Vec<_>>().join(", "),
            })?;

        Ok(VerifiedMessage {
            signer: recovered,
            time: envelope.message.time,
            payload,
        })
    }
}

/// Envelope production with a held secp256k1 key.
///
/// Wraps a [`TypedDataVerifier`] so one value can both produce and check
/// envelopes under the same schema and domain.
#[derive(Clone)]
pub struct TypedDataSigner {
    verifier: TypedDataVerifier,
    key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for TypedDataSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedDataSigner")
            .field("address", &self.address)
            .field("domain", self.verifier.domain())
            .finish_non_exhaustive()
    }
}

impl TypedDataSigner {
    pub fn new(schema: Arc<Schema>, domain: EnvelopeDomain, key: SigningKey) -> Self {
        let address = Address::from_public_key(key.verifying_key());
        Self {
            verifier: TypedDataVerifier::new(schema, domain),
            key,
            address,
        }
    }

    /// The address `message.signer` will carry.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn verifier(&self) -> &TypedDataVerifier {
        &self.verifier
    }

    /// Sign an action stamped with the current wall-clock time.
    pub fn sign(&self, action: &Action) -> Result<Vec<u8>, EnvelopeError> {
        self.sign_at(action, now_millis())
    }

    /// Sign an action with an explicit timestamp.
    pub fn sign_at(&self, action: &Action, time: i64) -> Result<Vec<u8>, EnvelopeError> {
        let shape = self.verifier.shape(action.shape_name())?;
        let data = action.to_data_value()?;
        let digest = self
            .verifier
            .signing_digest(shape, &self.address, time, &data)?;

        let (signature, recovery) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| EnvelopeError::Signing(e.to_string()))?;

        let mut sig_bytes = [0u8; 65];
        sig_bytes[..64].copy_from_slice(&signature.to_bytes());
        let v = recovery.to_byte();
        // Ethereum convention: recovery ids 0 and 1 travel as 27 and 28.
        sig_bytes[64] = if v < 27 { v + 27 } else { v };

        let envelope = SignedEnvelope {
            primary_type: action.shape_name().to_string(),
            domain: self.verifier.domain().clone(),
            message: EnvelopeMessage {
                data,
                signer: self.address.to_string(),
                time,
            },
            signature: format!("0x{}", hex::encode(sig_bytes)),
        };
        serde_json::to_vec(&envelope).map_err(|e| EnvelopeError::Signing(e.to_string()))
    }

    /// Verify an envelope under this signer's schema and domain.
    pub fn verify(&self, raw: &[u8]) -> Result<VerifiedMessage, EnvelopeError> {
        self.verifier.verify(raw)
    }
}
