//! # structsig-crypto — Signing Primitives
//!
//! Provides the key handles the signature engines consume:
//!
//! - **[`PayloadSigner`] / [`PayloadVerifier`]** traits, the seam between the
//!   protocol and any concrete signature scheme.
//! - **Ed25519** implementations of both traits.
//! - **PEM loading** of PKCS#8 private keys, SPKI public keys, and X.509
//!   certificates.
//! - **[`SignatureBytes`]**, the raw signature blob with its hex form.
//!
//! ## Crate Policy
//!
//! - Depends only on `structsig-core` internally.
//! - Signing input is always `&CanonicalPayload`.
//! - Private keys are never serialized or logged.
//! - A signature that does not match is `false`, not an error.

pub mod ed25519;
pub mod error;
pub mod pem;
pub mod provider;
pub mod signature;

// Re-export primary types.
pub use ed25519::{Ed25519Signer, Ed25519Verifier};
pub use error::CryptoError;
pub use provider::{PayloadSigner, PayloadVerifier};
pub use signature::SignatureBytes;
