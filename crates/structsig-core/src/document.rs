//! # Documents — Named Binary Fields in Canonical Order
//!
//! A [`Document`] is a set of [`Field`]s with unique, non-empty keys. The
//! fields are held in a `BTreeMap`, whose `String` ordering is byte-wise
//! lexicographic over UTF-8. Iteration therefore always yields the
//! canonical order regardless of how the caller supplied the fields.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::DocumentError;

/// A single named field with a raw binary value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Identifier, unique within a document.
    pub key: String,
    /// Raw field content.
    pub value: Vec<u8>,
}

impl Field {
    /// Create a field from a key and raw bytes.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a field holding the UTF-8 bytes of `text`.
    pub fn text(key: impl Into<String>, text: &str) -> Self {
        Self::new(key, text.as_bytes())
    }
}

/// A structured document: unique keys mapped to raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: BTreeMap<String, Vec<u8>>,
}

impl Document {
    /// Build a document from fields in any order.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::DuplicateKey`] if two fields share a key and
    /// [`DocumentError::EmptyKey`] if a key is empty.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Result<Self, DocumentError> {
        let mut doc = Self::default();
        for field in fields {
            doc.insert(field)?;
        }
        Ok(doc)
    }

    /// Start a [`DocumentBuilder`].
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Add a field whose key is not yet present.
    ///
    /// # Errors
    ///
    /// Same as [`Document::new()`].
    pub fn insert(&mut self, field: Field) -> Result<(), DocumentError> {
        if field.key.is_empty() {
            return Err(DocumentError::EmptyKey);
        }
        match self.fields.entry(field.key) {
            Entry::Occupied(e) => Err(DocumentError::DuplicateKey(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(field.value);
                Ok(())
            }
        }
    }

    /// Overwrite the value of an existing field, returning the old value.
    ///
    /// Absent keys are left absent and `None` is returned.
    pub fn replace_value(&mut self, key: &str, value: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        self.fields
            .get_mut(key)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    /// Value of the field named `key`, if present.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// Whether a field named `key` exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Fields as `(key, value)` pairs in canonical (byte-wise ascending) order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Incremental construction of a [`Document`] from text and binary inputs.
///
/// Validation is deferred to [`DocumentBuilder::build()`] so inputs can be
/// chained without intermediate `?`.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    fields: Vec<Field>,
}

impl DocumentBuilder {
    /// Add a field holding the UTF-8 bytes of `text`.
    pub fn text(mut self, key: impl Into<String>, text: &str) -> Self {
        self.fields.push(Field::text(key, text));
        self
    }

    /// Add a field holding raw bytes.
    pub fn bytes(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }

    /// Validate and produce the document.
    ///
    /// # Errors
    ///
    /// Same as [`Document::new()`].
    pub fn build(self) -> Result<Document, DocumentError> {
        Document::new(self.fields)
    }
}
