//! # Signature Records
//!
//! Typed signature values and their persisted JSON forms.
//!
//! | Typed                  | Persisted                                               |
//! |------------------------|---------------------------------------------------------|
//! | [`NodalSignature`]     | `{"signer": str, "signature": hex\|null, "scope": [str]\|null}` |
//! | [`SequentialSignature`]| `{"signatures": [nodal]\|null}`                          |
//!
//! The typed side uses sum types ([`SignatureState`], [`Scope`]) where the
//! persisted side uses `null`. Conversion from the persisted side validates
//! hex and scope keys and fails with [`SignatureError::Format`].

use serde::{Deserialize, Serialize};
use structsig_core::Scope;
use structsig_crypto::SignatureBytes;

use crate::error::SignatureError;

/// Whether a nodal signature has been produced yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignatureState {
    /// Created but not yet signed.
    #[default]
    Unsigned,
    /// Holds the raw signature bytes.
    Signed(SignatureBytes),
}

/// One signer's signature over a chosen scope.
///
/// Fields are public so callers can inspect and, deliberately, alter a
/// record (e.g. to confirm that a modified scope no longer verifies).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NodalRecord", into = "NodalRecord")]
pub struct NodalSignature {
    /// Name of the signer.
    pub signer: String,
    /// The signature, once produced.
    pub signature: SignatureState,
    /// Fields the signature covers.
    pub scope: Scope,
}

impl NodalSignature {
    /// An unsigned record for `signer` over `scope`.
    pub fn unsigned(signer: impl Into<String>, scope: Scope) -> Self {
        Self {
            signer: signer.into(),
            signature: SignatureState::Unsigned,
            scope,
        }
    }

    /// A signed record built from raw signature bytes.
    pub fn signed(signer: impl Into<String>, scope: Scope, signature: SignatureBytes) -> Self {
        Self {
            signer: signer.into(),
            signature: SignatureState::Signed(signature),
            scope,
        }
    }

    /// Whether a signature is present.
    pub fn is_signed(&self) -> bool {
        matches!(self.signature, SignatureState::Signed(_))
    }

    /// The raw signature bytes, if signed.
    pub fn signature_bytes(&self) -> Option<&SignatureBytes> {
        match &self.signature {
            SignatureState::Signed(bytes) => Some(bytes),
            SignatureState::Unsigned => None,
        }
    }

    /// The raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Format`] if the record is unsigned.
    pub fn require_signature(&self) -> Result<&SignatureBytes, SignatureError> {
        self.signature_bytes().ok_or_else(|| {
            SignatureError::Format(format!("signer {:?} has no signature", self.signer))
        })
    }
}

/// An ordered chain of nodal signatures. Position is signing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SequentialRecord", into = "SequentialRecord")]
pub struct SequentialSignature {
    /// Entries, earliest signer first.
    pub signatures: Vec<NodalSignature>,
}

impl SequentialSignature {
    /// Number of entries in the chain.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Returns true if nobody has signed yet.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Entries in signing order.
    pub fn entries(&self) -> &[NodalSignature] {
        &self.signatures
    }

    /// Signer names in signing order.
    pub fn signers(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(|s| s.signer.as_str())
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&NodalSignature> {
        self.signatures.last()
    }
}

// ---------------------------------------------------------------------------
// Persisted forms
// ---------------------------------------------------------------------------

/// Persisted nodal signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodalRecord {
    /// Name of the signer.
    pub signer: String,
    /// Lowercase hex signature, or `null` before signing.
    #[serde(default)]
    pub signature: Option<String>,
    /// Covered keys, or `null` for every field.
    #[serde(default)]
    pub scope: Option<Vec<String>>,
}

/// Persisted sequential signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialRecord {
    /// Nodal records in signing order, or `null` before the first signer.
    #[serde(default)]
    pub signatures: Option<Vec<NodalRecord>>,
}

impl TryFrom<NodalRecord> for NodalSignature {
    type Error = SignatureError;

    fn try_from(record: NodalRecord) -> Result<Self, Self::Error> {
        let signature = match record.signature {
            None => SignatureState::Unsigned,
            Some(hex_str) => SignatureState::Signed(SignatureBytes::from_hex(&hex_str)?),
        };
        Ok(Self {
            signer: record.signer,
            signature,
            scope: Scope::from_keys(record.scope)?,
        })
    }
}

impl From<NodalSignature> for NodalRecord {
    fn from(sig: NodalSignature) -> Self {
        Self {
            signature: sig.signature_bytes().map(SignatureBytes::to_hex),
            scope: sig.scope.to_keys(),
            signer: sig.signer,
        }
    }
}

impl TryFrom<SequentialRecord> for SequentialSignature {
    type Error = SignatureError;

    fn try_from(record: SequentialRecord) -> Result<Self, Self::Error> {
        let signatures = record
            .signatures
            .unwrap_or_default()
            .into_iter()
            .map(NodalSignature::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { signatures })
    }
}

impl From<SequentialSignature> for SequentialRecord {
    fn from(seq: SequentialSignature) -> Self {
        let signatures = if seq.signatures.is_empty() {
            None
        } else {
            Some(seq.signatures.into_iter().map(NodalRecord::from).collect())
        };
        Self { signatures }
    }
}
