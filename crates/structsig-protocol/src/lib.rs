//! # structsig-protocol — Nodal and Sequential Signatures
//!
//! Signature engines over scoped [`Document`](structsig_core::Document)s.
//!
//! - **[`nodal`]**: one signer attests to one scope, independent of any
//!   other signature.
//! - **[`sequential`]**: an ordered chain in which each signer also commits
//!   to the raw signature bytes of every earlier signer.
//! - **[`record`]**: the typed signature values and their persisted JSON
//!   forms.
//! - **[`store`]**: `.sig` / `.nodalsig` / `.seqsig` files.
//!
//! ## Error Policy
//!
//! Verification distinguishes "does not match" (`Ok(false)`) from "could
//! not check" (`Err(SignatureError)`). Bad keys, malformed hex, and chains
//! whose length differs from the key list are errors, never `false`.
//!
//! ## Crate Policy
//!
//! - Every operation is a pure function of its arguments.
//! - Chains are immutable values; signing returns a new chain.

pub mod error;
pub mod nodal;
pub mod record;
pub mod sequential;
pub mod store;

pub use error::SignatureError;
pub use record::{
    NodalRecord, NodalSignature, SequentialRecord, SequentialSignature, SignatureState,
};
pub use store::SignatureStore;
