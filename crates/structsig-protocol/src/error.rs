//! # Protocol Error Types
//!
//! The failure taxonomy of the signature engines. A signature that simply
//! does not match is never one of these: verification returns `Ok(false)`.

use std::path::PathBuf;

use structsig_core::{DocumentError, EncodingError};
use structsig_crypto::CryptoError;
use thiserror::Error;

/// Errors from signing, verifying, and persisting structured signatures.
#[derive(Error, Debug)]
pub enum SignatureError {
    /// Key or certificate material is unreadable or unparsable.
    #[error("key load error: {0}")]
    KeyLoad(String),

    /// A record holds malformed hex, a malformed scope, or no signature.
    #[error("format error: {0}")]
    Format(String),

    /// The number of verification keys differs from the chain length.
    #[error("chain has {signatures} signatures but {keys} verification keys were supplied")]
    LengthMismatch {
        /// Entries in the chain.
        signatures: usize,
        /// Keys supplied by the caller.
        keys: usize,
    },

    /// A chain passed to the sequential engine is inconsistent.
    #[error("invalid chain state: {0}")]
    ChainState(String),

    /// A field value could not be decoded before resolving the payload.
    #[error("scope resolution failed: {0}")]
    ScopeResolution(#[from] EncodingError),

    /// The signing backend failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Reading or writing a signature file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<CryptoError> for SignatureError {
    fn from(err: CryptoError) -> Self {
        match err {
            e @ (CryptoError::KeyLoad(_) | CryptoError::KeyFile { .. }) => {
                Self::KeyLoad(e.to_string())
            }
            CryptoError::HexDecode(msg) => Self::Format(msg),
            CryptoError::Signing(msg) => Self::Signing(msg),
        }
    }
}

impl From<DocumentError> for SignatureError {
    fn from(err: DocumentError) -> Self {
        Self::Format(err.to_string())
    }
}
