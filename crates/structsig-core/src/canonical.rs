//! # Canonical Payload — Scope Resolution
//!
//! This module defines `CanonicalPayload`, the sole construction path for
//! the bytes a signature is computed over.
//!
//! ## Security Invariant
//!
//! The `CanonicalPayload` newtype has a private inner field. It can only be
//! produced by [`CanonicalPayload::resolve()`] and extended by
//! [`CanonicalPayload::chained()`]. Signing and verification primitives
//! accept `&CanonicalPayload`, so a signature over bytes that skipped the
//! canonical ordering is unrepresentable.
//!
//! ## Algorithm
//!
//! 1. Visit the document's fields in byte-wise ascending key order.
//! 2. Keep a field if the scope is [`Scope::AllFields`] or names its key.
//! 3. Concatenate the kept raw values with no separators.
//!
//! The payload is a pure function of the field set and the scope. Keys in
//! the scope that the document lacks are ignored.

use crate::document::Document;
use crate::scope::Scope;

/// Bytes produced exclusively by scope resolution, optionally followed by
/// the raw signatures of earlier chain entries.
///
/// # Invariants
///
/// - Included field values appear in byte-wise ascending key order.
/// - No separators or length prefixes are inserted.
/// - Chained signature bytes are appended after the field values, earliest
///   signer first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPayload(Vec<u8>);

impl CanonicalPayload {
    /// Resolve the payload a signer over `scope` commits to.
    pub fn resolve(document: &Document, scope: &Scope) -> Self {
        let mut bytes = Vec::new();
        for (key, value) in document.fields() {
            if scope.includes(key) {
                bytes.extend_from_slice(value);
            }
        }
        tracing::trace!(
            fields = document.len(),
            scope = %scope,
            payload_len = bytes.len(),
            "resolved canonical payload"
        );
        Self(bytes)
    }

    /// Append raw signature bytes of prior chain entries, in the given order.
    pub fn chained<'a, I>(mut self, prior_signatures: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        for signature in prior_signatures {
            self.0.extend_from_slice(signature);
        }
        self
    }

    /// Access the payload bytes for signing or verification.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the payload.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
