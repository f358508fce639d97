//! # Raw Signature Bytes
//!
//! The un-encoded signature blob a signer produced. Records carry it as a
//! lowercase hex string; raw `.sig` files carry it verbatim.
//!
//! The length is not fixed here. A verifier decides whether a blob of the
//! wrong size is acceptable, and Ed25519 answers `false` for it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CryptoError;

/// Raw signature bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SignatureBytes(Vec<u8>);

impl SignatureBytes {
    /// Wrap raw signature bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render the signature as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a signature from hex. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HexDecode`] on odd length or non-hex digits.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        hex::decode(hex_str.trim())
            .map(Self)
            .map_err(|e| CryptoError::HexDecode(format!("invalid signature hex: {e}")))
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the signature has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SignatureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = hex::encode(self.0.iter().take(4).copied().collect::<Vec<u8>>());
        write!(f, "SignatureBytes({prefix}..., {} bytes)", self.0.len())
    }
}

impl std::fmt::Display for SignatureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let sig = SignatureBytes::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(sig.to_hex(), "deadbeef");
        assert_eq!(SignatureBytes::from_hex("deadbeef").unwrap(), sig);
    }

    #[test]
    fn uppercase_and_whitespace_accepted() {
        let sig = SignatureBytes::from_hex("  DEADBEEF\n").unwrap();
        assert_eq!(sig.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn odd_length_rejected() {
        assert!(matches!(
            SignatureBytes::from_hex("abc"),
            Err(CryptoError::HexDecode(_))
        ));
    }

    #[test]
    fn non_hex_rejected() {
        assert!(SignatureBytes::from_hex("zz").is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let sig = SignatureBytes::new(vec![1, 2, 255]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, r#""0102ff""#);
        let back: SignatureBytes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
        assert!(serde_json::from_str::<SignatureBytes>(r#""xyz""#).is_err());
    }

    #[test]
    fn debug_shows_prefix_and_length() {
        let sig = SignatureBytes::new(vec![0xab; 64]);
        assert_eq!(format!("{sig:?}"), "SignatureBytes(abababab..., 64 bytes)");
    }
}
