//! # Transport Form
//!
//! JSON shape used to move documents between tools:
//!
//! ```json
//! {"items": [{"key": "text1", "value": "SGVsbG8="}]}
//! ```
//!
//! Values are standard base64 with padding. Decoding happens once, at the
//! boundary, so the resolver only ever sees raw bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::document::{Document, Field};
use crate::error::EncodingError;

/// A field with its value in base64 transport encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportField {
    /// Field key.
    pub key: String,
    /// Base64-encoded field value.
    pub value: String,
}

/// A document in transport form. Item order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportDocument {
    /// Encoded fields.
    pub items: Vec<TransportField>,
}

impl TransportDocument {
    /// Parse a transport document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Json`] if the text is not a transport document.
    pub fn from_json(json: &str) -> Result<Self, EncodingError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Document {
    /// Decode a transport document into raw fields.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::InvalidBase64`] naming the first field whose
    /// value does not decode, or [`EncodingError::Document`] if the decoded
    /// fields violate a document invariant.
    pub fn from_transport(transport: &TransportDocument) -> Result<Self, EncodingError> {
        let fields = transport
            .items
            .iter()
            .map(|item| {
                STANDARD
                    .decode(item.value.as_bytes())
                    .map(|value| Field::new(item.key.clone(), value))
                    .map_err(|source| EncodingError::InvalidBase64 {
                        key: item.key.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Document::new(fields)?)
    }

    /// Encode into transport form, items in canonical key order.
    pub fn to_transport(&self) -> TransportDocument {
        TransportDocument {
            items: self
                .fields()
                .map(|(key, value)| TransportField {
                    key: key.to_string(),
                    value: STANDARD.encode(value),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalPayload;
    use crate::error::DocumentError;
    use crate::scope::Scope;

    #[test]
    fn decodes_base64_values() {
        let json = r#"{"items":[
            {"key":"text2","value":"V29ybGQ="},
            {"key":"text1","value":"SGVsbG8="}
        ]}"#;
        let doc = Document::from_transport(&TransportDocument::from_json(json).unwrap()).unwrap();
        assert_eq!(doc.get("text1"), Some(&b"Hello"[..]));
        assert_eq!(
            CanonicalPayload::resolve(&doc, &Scope::AllFields).as_bytes(),
            b"HelloWorld"
        );
    }

    #[test]
    fn invalid_base64_names_the_field() {
        let transport = TransportDocument {
            items: vec![TransportField {
                key: "file1".to_string(),
                value: "not base64!".to_string(),
            }],
        };
        match Document::from_transport(&transport) {
            Err(EncodingError::InvalidBase64 { key, .. }) => assert_eq!(key, "file1"),
            other => panic!("expected InvalidBase64, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_keys_rejected_after_decoding() {
        let transport = TransportDocument {
            items: vec![
                TransportField {
                    key: "a".into(),
                    value: "eA==".into(),
                },
                TransportField {
                    key: "a".into(),
                    value: "eQ==".into(),
                },
            ],
        };
        assert!(matches!(
            Document::from_transport(&transport),
            Err(EncodingError::Document(DocumentError::DuplicateKey(_)))
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            TransportDocument::from_json(r#"{"fields": []}"#),
            Err(EncodingError::Json(_))
        ));
    }

    #[test]
    fn to_transport_is_sorted() {
        let doc = Document::builder()
            .text("b", "B")
            .bytes("a", vec![0xff, 0x00])
            .build()
            .unwrap();
        let transport = doc.to_transport();
        assert_eq!(transport.items[0].key, "a");
        assert_eq!(transport.items[0].value, "/wA=");
        assert_eq!(transport.items[1].value, "Qg==");
        assert_eq!(Document::from_transport(&transport).unwrap(), doc);
    }
}
