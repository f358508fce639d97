//! # Nodal Signatures
//!
//! One signer, one scope, no dependency on any other signature.
//!
//! Verification recomputes the payload from the document and the scope
//! recorded in the signature. Nothing cached at signing time is trusted,
//! so altering either the document or the declared scope is detected.

use structsig_core::{CanonicalPayload, Document, Scope};
use structsig_crypto::{PayloadSigner, PayloadVerifier};

use crate::error::SignatureError;
use crate::record::NodalSignature;

/// Sign `document` restricted to `scope` as `signer`.
///
/// # Errors
///
/// Returns [`SignatureError::Signing`] if the key backend fails.
pub fn sign<S>(
    signer: impl Into<String>,
    document: &Document,
    scope: Scope,
    key: &S,
) -> Result<NodalSignature, SignatureError>
where
    S: PayloadSigner + ?Sized,
{
    let signer = signer.into();
    let payload = CanonicalPayload::resolve(document, &scope);
    let signature = key.sign(&payload)?;
    tracing::debug!(
        signer = %signer,
        scope = %scope,
        payload_len = payload.len(),
        algorithm = key.algorithm(),
        "produced nodal signature"
    );
    Ok(NodalSignature::signed(signer, scope, signature))
}

/// Check `signature` against `document` with `key`.
///
/// Returns `Ok(false)` when the signature does not match.
///
/// # Errors
///
/// Returns [`SignatureError::Format`] if the record carries no signature.
pub fn verify<V>(
    document: &Document,
    signature: &NodalSignature,
    key: &V,
) -> Result<bool, SignatureError>
where
    V: PayloadVerifier + ?Sized,
{
    let bytes = signature.require_signature()?;
    let payload = CanonicalPayload::resolve(document, &signature.scope);
    let valid = key.verify(&payload, bytes);
    tracing::debug!(
        signer = %signature.signer,
        scope = %signature.scope,
        payload_len = payload.len(),
        valid,
        "checked nodal signature"
    );
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use structsig_crypto::Ed25519Signer;

    fn document() -> Document {
        Document::builder()
            .text("text1", "Hello")
            .text("text2", "World")
            .bytes("file1", vec![0u8, 1, 2, 3, 255])
            .build()
            .unwrap()
    }

    #[test]
    fn all_fields_roundtrip() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]);
        let doc = document();
        let sig = sign("Signer1", &doc, Scope::AllFields, &key).unwrap();
        assert_eq!(sig.signer, "Signer1");
        assert!(sig.is_signed());
        assert!(verify(&doc, &sig, &key.verifier()).unwrap());
    }

    #[test]
    fn scope_is_recorded() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]);
        let scope = Scope::subset(["file1", "text1"]).unwrap();
        let sig = sign("Signer1", &document(), scope.clone(), &key).unwrap();
        assert_eq!(sig.scope, scope);
    }

    #[test]
    fn unsigned_record_is_format_error() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]).verifier();
        let sig = NodalSignature::unsigned("Signer1", Scope::AllFields);
        assert!(matches!(
            verify(&document(), &sig, &key),
            Err(SignatureError::Format(_))
        ));
    }

    #[test]
    fn change_outside_scope_is_ignored() {
        let key = Ed25519Signer::from_seed(&[2u8; 32]);
        let mut doc = document();
        let sig = sign("S", &doc, Scope::subset(["text1"]).unwrap(), &key).unwrap();
        doc.replace_value("text2", b"Mars".to_vec());
        assert!(verify(&doc, &sig, &key.verifier()).unwrap());
    }

    #[test]
    fn change_inside_scope_fails() {
        let key = Ed25519Signer::from_seed(&[2u8; 32]);
        let mut doc = document();
        let sig = sign("S", &doc, Scope::subset(["text1"]).unwrap(), &key).unwrap();
        doc.replace_value("text1", b"Hullo".to_vec());
        assert!(!verify(&doc, &sig, &key.verifier()).unwrap());
    }

    #[test]
    fn widened_scope_fails() {
        let key = Ed25519Signer::from_seed(&[3u8; 32]);
        let doc = document();
        let mut sig = sign("S", &doc, Scope::subset(["file1"]).unwrap(), &key).unwrap();
        sig.scope = Scope::subset(["file1", "text1"]).unwrap();
        assert!(!verify(&doc, &sig, &key.verifier()).unwrap());
    }

    #[test]
    fn works_through_trait_objects() {
        let key: Box<dyn PayloadSigner> = Box::new(Ed25519Signer::from_seed(&[4u8; 32]));
        let verifier: Box<dyn PayloadVerifier> =
            Box::new(Ed25519Signer::from_seed(&[4u8; 32]).verifier());
        let doc = document();
        let sig = sign("S", &doc, Scope::AllFields, key.as_ref()).unwrap();
        assert!(verify(&doc, &sig, verifier.as_ref()).unwrap());
    }

    fn scope_strategy() -> impl Strategy<Value = Scope> {
        prop_oneof![
            Just(Scope::AllFields),
            proptest::sample::subsequence(vec!["text1", "text2", "file1", "absent"], 0..=4)
                .prop_map(|keys| Scope::subset(keys).unwrap()),
        ]
    }

    proptest! {
        #[test]
        fn sign_then_verify_holds_for_any_scope(
            scope in scope_strategy(),
            seed in any::<[u8; 32]>(),
        ) {
            let key = Ed25519Signer::from_seed(&seed);
            let doc = document();
            let sig = sign("S", &doc, scope, &key).unwrap();
            prop_assert!(verify(&doc, &sig, &key.verifier()).unwrap());
        }
    }
}
