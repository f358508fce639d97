//! # Error Types
//!
//! Data-model failures. Both enums use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! Resolving a payload from an already-built [`Document`](crate::Document)
//! cannot fail; every failure here happens while a document or scope is
//! being constructed or decoded from its transport form.

use thiserror::Error;

/// A document or scope violates a structural invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Two fields share the same key.
    #[error("duplicate field key {0:?}")]
    DuplicateKey(String),

    /// A field was supplied with an empty key.
    #[error("field keys must not be empty")]
    EmptyKey,

    /// A scope references the empty key, which no field can carry.
    #[error("scope references an empty field key")]
    EmptyScopeKey,
}

/// A field value could not be decoded from its transport encoding.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The base64 text of a field value is malformed.
    #[error("field {key:?} is not valid base64: {source}")]
    InvalidBase64 {
        /// Key of the offending field.
        key: String,
        /// Underlying decoder error.
        #[source]
        source: base64::DecodeError,
    },

    /// The transport document itself is malformed.
    #[error("transport document is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded fields do not form a valid document.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
