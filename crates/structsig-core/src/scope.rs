//! # Signing Scope
//!
//! The subset of a document's fields a signature covers.
//!
//! Persisted records encode a scope as either `null` (every field) or a
//! JSON array of keys. [`Scope`] keeps those two cases apart as enum
//! variants, so an empty array (nothing selected) can never be confused
//! with `null` (everything selected).

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DocumentError;

/// Which fields of a document a signature covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every field of the document.
    #[default]
    AllFields,
    /// Only the named fields. Keys absent from the document never match.
    Subset(BTreeSet<String>),
}

impl Scope {
    /// Scope selecting only the given keys.
    ///
    /// Repeated keys collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyScopeKey`] if any key is empty.
    pub fn subset<I, S>(keys: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        if keys.contains("") {
            return Err(DocumentError::EmptyScopeKey);
        }
        Ok(Self::Subset(keys))
    }

    /// Scope selecting no field at all. Its payload contribution is empty.
    pub fn empty() -> Self {
        Self::Subset(BTreeSet::new())
    }

    /// Build a scope from the nullable key list of the record format.
    ///
    /// # Errors
    ///
    /// Same as [`Scope::subset()`].
    pub fn from_keys(keys: Option<Vec<String>>) -> Result<Self, DocumentError> {
        match keys {
            None => Ok(Self::AllFields),
            Some(keys) => Self::subset(keys),
        }
    }

    /// The nullable key list of the record format, keys in sorted order.
    pub fn to_keys(&self) -> Option<Vec<String>> {
        match self {
            Self::AllFields => None,
            Self::Subset(keys) => Some(keys.iter().cloned().collect()),
        }
    }

    /// Whether the field named `key` is covered.
    pub fn includes(&self, key: &str) -> bool {
        match self {
            Self::AllFields => true,
            Self::Subset(keys) => keys.contains(key),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllFields => f.write_str("*"),
            Self::Subset(keys) => {
                f.write_str("{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(key)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_keys().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Option::<Vec<String>>::deserialize(deserializer)?;
        Self::from_keys(keys).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_includes_everything() {
        let scope = Scope::AllFields;
        assert!(scope.includes("anything"));
        assert!(scope.includes("text1"));
    }

    #[test]
    fn empty_subset_includes_nothing() {
        let scope = Scope::empty();
        assert!(!scope.includes("text1"));
        assert_ne!(scope, Scope::AllFields);
    }

    #[test]
    fn subset_membership() {
        let scope = Scope::subset(["file1", "text1"]).unwrap();
        assert!(scope.includes("file1"));
        assert!(scope.includes("text1"));
        assert!(!scope.includes("text2"));
    }

    #[test]
    fn subset_deduplicates_keys() {
        let a = Scope::subset(["text1", "text1", "file1"]).unwrap();
        let b = Scope::subset(["file1", "text1"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_scope_key_rejected() {
        assert_eq!(
            Scope::subset(["text1", ""]).unwrap_err(),
            DocumentError::EmptyScopeKey
        );
    }

    #[test]
    fn serde_null_is_all_fields() {
        let scope: Scope = serde_json::from_str("null").unwrap();
        assert_eq!(scope, Scope::AllFields);
        assert_eq!(serde_json::to_string(&Scope::AllFields).unwrap(), "null");
    }

    #[test]
    fn serde_array_is_sorted_subset() {
        let scope: Scope = serde_json::from_str(r#"["text1","file1"]"#).unwrap();
        assert_eq!(scope, Scope::subset(["file1", "text1"]).unwrap());
        assert_eq!(
            serde_json::to_string(&scope).unwrap(),
            r#"["file1","text1"]"#
        );
    }

    #[test]
    fn serde_empty_array_is_empty_subset() {
        let scope: Scope = serde_json::from_str("[]").unwrap();
        assert_eq!(scope, Scope::empty());
    }

    #[test]
    fn serde_rejects_empty_key() {
        assert!(serde_json::from_str::<Scope>(r#"["a",""]"#).is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Scope::AllFields.to_string(), "*");
        assert_eq!(Scope::empty().to_string(), "{}");
        assert_eq!(
            Scope::subset(["text1", "file1"]).unwrap().to_string(),
            "{file1,text1}"
        );
    }
}
