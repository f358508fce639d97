//! # Cryptographic Error Types
//!
//! Structured errors for key loading and signature transcoding.
//! Signature mismatch is deliberately absent: verifiers report it as `false`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from key handling in `structsig-crypto`.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key or certificate material could not be parsed.
    #[error("key load error: {0}")]
    KeyLoad(String),

    /// Key or certificate file could not be read.
    #[error("failed to read key material from {path}: {source}")]
    KeyFile {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A hex-encoded signature or key is malformed.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// The signing backend failed to produce a signature.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl CryptoError {
    /// Whether this error stems from unreadable or unparsable key material.
    pub fn is_key_load(&self) -> bool {
        matches!(self, Self::KeyLoad(_) | Self::KeyFile { .. })
    }
}
