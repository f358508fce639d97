//! # structsig-core — Foundational Types for Structured Multi-Signatures
//!
//! This crate is the leaf of the structsig workspace. It defines the data
//! model every signature is computed over and the single path that turns
//! a document plus a scope into signable bytes.
//!
//! ## Key Design Principles
//!
//! 1. **Documents are ordered by construction.** A [`Document`] stores its
//!    fields keyed by name in byte-wise ascending order, so the order in
//!    which a caller supplied the fields can never reach the payload.
//!
//! 2. **`CanonicalPayload` newtype.** Every byte string that is signed or
//!    verified flows through [`CanonicalPayload::resolve()`]. Signing
//!    primitives accept `&CanonicalPayload`, never raw `&[u8]`.
//!
//! 3. **Scopes are a sum type.** [`Scope::AllFields`] and [`Scope::Subset`]
//!    replace the nullable key list of the persisted record format. An
//!    empty subset is a real scope that selects nothing.
//!
//! 4. **Duplicate keys are rejected.** Construction fails with
//!    [`DocumentError::DuplicateKey`] instead of silently keeping one value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `structsig-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod document;
pub mod error;
pub mod scope;
pub mod transport;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalPayload;
pub use document::{Document, DocumentBuilder, Field};
pub use error::{DocumentError, EncodingError};
pub use scope::Scope;
pub use transport::{TransportDocument, TransportField};
