//! # seastream-core — Foundational Types for the Seastream Node
//!
//! This crate provides the value types shared by every other crate in the
//! workspace:
//!
//! - **[`Address`]** — a stable 20-byte identity derived from a secp256k1
//!   public key, with the canonical `0x`-hex string form.
//! - **[`keccak256`]** — the keccak-256 digest (distinct from NIST SHA-3)
//!   used for address derivation and EIP-712 hashing.
//! - **[`now_millis`]** — wall-clock time as epoch milliseconds, the unit
//!   used in signed envelopes.
//!
//! Everything here is a pure value transform: no I/O, no global state, and
//! all types are freely shareable across threads.

pub mod address;
pub mod hash;
pub mod time;

pub use address::{Address, AddressError};
pub use hash::keccak256;
pub use time::now_millis;
