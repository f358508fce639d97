//! # PEM Key Loading
//!
//! Reads signer keys and verifier certificates from PEM files. Verifier
//! material may be either an X.509 certificate or a bare SPKI public key;
//! the PEM label decides which parser runs.

use std::path::Path;

use zeroize::Zeroizing;

use crate::ed25519::{Ed25519Signer, Ed25519Verifier};
use crate::error::CryptoError;

const CERTIFICATE_LABEL: &str = "-----BEGIN CERTIFICATE-----";
const PUBLIC_KEY_LABEL: &str = "-----BEGIN PUBLIC KEY-----";

/// Kind of verifier material found in a PEM document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierPemKind {
    /// `-----BEGIN CERTIFICATE-----`
    Certificate,
    /// `-----BEGIN PUBLIC KEY-----`
    PublicKey,
}

/// Detect whether a PEM document holds a certificate or a public key.
///
/// # Errors
///
/// Returns [`CryptoError::KeyLoad`] if neither label is present.
pub fn detect_verifier_pem(pem: &str) -> Result<VerifierPemKind, CryptoError> {
    if pem.contains(CERTIFICATE_LABEL) {
        Ok(VerifierPemKind::Certificate)
    } else if pem.contains(PUBLIC_KEY_LABEL) {
        Ok(VerifierPemKind::PublicKey)
    } else {
        Err(CryptoError::KeyLoad(
            "expected a CERTIFICATE or PUBLIC KEY PEM block".to_string(),
        ))
    }
}

/// Parse verifier material from a PEM certificate or public key.
///
/// # Errors
///
/// Returns [`CryptoError::KeyLoad`] if the PEM is neither, or fails to parse.
pub fn verifier_from_pem(pem: &str) -> Result<Ed25519Verifier, CryptoError> {
    match detect_verifier_pem(pem)? {
        VerifierPemKind::Certificate => Ed25519Verifier::from_certificate_pem(pem),
        VerifierPemKind::PublicKey => Ed25519Verifier::from_spki_pem(pem),
    }
}

/// Load a signer from a PKCS#8 PEM private key file.
///
/// The file contents are zeroized once parsed.
///
/// # Errors
///
/// Returns [`CryptoError::KeyFile`] if the file cannot be read and
/// [`CryptoError::KeyLoad`] if it does not parse.
pub fn load_signer(path: &Path) -> Result<Ed25519Signer, CryptoError> {
    let pem = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
        CryptoError::KeyFile {
            path: path.to_path_buf(),
            source,
        }
    })?);
    let signer = Ed25519Signer::from_pkcs8_pem(&pem)?;
    tracing::debug!(path = %path.display(), "loaded signing key");
    Ok(signer)
}

/// Load a verifier from a PEM certificate or public key file.
///
/// # Errors
///
/// Returns [`CryptoError::KeyFile`] if the file cannot be read and
/// [`CryptoError::KeyLoad`] if it does not parse.
pub fn load_verifier(path: &Path) -> Result<Ed25519Verifier, CryptoError> {
    let pem = std::fs::read_to_string(path).map_err(|source| CryptoError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;
    let verifier = verifier_from_pem(&pem)?;
    tracing::debug!(path = %path.display(), key = %verifier, "loaded verification key");
    Ok(verifier)
}
