//! # Key Handle Abstraction
//!
//! The signature engines never touch a concrete key type. They sign through
//! a [`PayloadSigner`] and verify through a [`PayloadVerifier`], which lets
//! a caller plug in any backend (in-memory keys, PEM files, hardware).
//!
//! ## Security Invariants
//!
//! - Input is `&CanonicalPayload` (never raw bytes).
//! - Both traits are `Send + Sync` so one key can serve parallel callers.
//! - `verify` returns `bool`. Problems with the key itself surface when the
//!   handle is constructed, not during verification.

use structsig_core::CanonicalPayload;

use crate::error::CryptoError;
use crate::signature::SignatureBytes;

/// A private-key handle able to sign canonical payloads.
pub trait PayloadSigner: Send + Sync {
    /// Sign the payload.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Signing`] if the backend cannot sign.
    fn sign(&self, payload: &CanonicalPayload) -> Result<SignatureBytes, CryptoError>;

    /// Signature scheme name (for diagnostics/logging).
    fn algorithm(&self) -> &'static str;
}

/// A public-key handle able to check signatures over canonical payloads.
pub trait PayloadVerifier: Send + Sync {
    /// Whether `signature` is a valid signature over exactly `payload`.
    fn verify(&self, payload: &CanonicalPayload, signature: &SignatureBytes) -> bool;

    /// Signature scheme name (for diagnostics/logging).
    fn algorithm(&self) -> &'static str;
}

impl<T: PayloadSigner + ?Sized> PayloadSigner for &T {
    fn sign(&self, payload: &CanonicalPayload) -> Result<SignatureBytes, CryptoError> {
        (**self).sign(payload)
    }

    fn algorithm(&self) -> &'static str {
        (**self).algorithm()
    }
}

impl<T: PayloadVerifier + ?Sized> PayloadVerifier for &T {
    fn verify(&self, payload: &CanonicalPayload, signature: &SignatureBytes) -> bool {
        (**self).verify(payload, signature)
    }

    fn algorithm(&self) -> &'static str {
        (**self).algorithm()
    }
}

impl<T: PayloadVerifier + ?Sized> PayloadVerifier for Box<T> {
    fn verify(&self, payload: &CanonicalPayload, signature: &SignatureBytes) -> bool {
        (**self).verify(payload, signature)
    }

    fn algorithm(&self) -> &'static str {
        (**self).algorithm()
    }
}
