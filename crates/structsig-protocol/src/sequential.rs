//! # Sequential Signatures
//!
//! A chain of nodal signatures in which every entry also commits to the raw
//! signature bytes of all entries before it.
//!
//! ## Payload of entry k
//!
//! ```text
//! resolve(document, scope_k) || sig_0 || sig_1 || ... || sig_{k-1}
//! ```
//!
//! Reordering, dropping, or altering any earlier entry therefore invalidates
//! every later one.
//!
//! ## Verification
//!
//! Entries are checked from the last to the first, each against its own
//! recomputed payload, stopping at the first one that fails. The chain is
//! valid only if every entry verifies.
//!
//! Chains are values: [`sign()`] takes a snapshot of the prior chain and
//! returns a new, longer one. Appending to a shared chain from two signers
//! at once is a caller-side ordering problem, not something this module
//! locks against.

use structsig_core::{CanonicalPayload, Document, Scope};
use structsig_crypto::{PayloadSigner, PayloadVerifier, SignatureBytes};

use crate::error::SignatureError;
use crate::record::{NodalSignature, SequentialSignature};

/// Append a signature by `signer` over `scope` to `chain`.
///
/// `chain` is `None` for the first signer. The input chain is left
/// untouched; the returned chain is one entry longer.
///
/// # Errors
///
/// - [`SignatureError::ChainState`] if `chain` is present but empty, or
///   holds an unsigned entry.
/// - [`SignatureError::Signing`] if the key backend fails.
pub fn sign<S>(
    signer: impl Into<String>,
    document: &Document,
    scope: Scope,
    key: &S,
    chain: Option<&SequentialSignature>,
) -> Result<SequentialSignature, SignatureError>
where
    S: PayloadSigner + ?Sized,
{
    let signer = signer.into();
    let prior: &[NodalSignature] = match chain {
        None => &[],
        Some(chain) if chain.is_empty() => {
            return Err(SignatureError::ChainState(
                "cannot extend a chain with no signatures".to_string(),
            ));
        }
        Some(chain) => chain.entries(),
    };

    let prior_bytes = prior
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            entry.signature_bytes().ok_or_else(|| {
                SignatureError::ChainState(format!(
                    "entry {position} ({:?}) is unsigned",
                    entry.signer
                ))
            })
        })
        .collect::<Result<Vec<&SignatureBytes>, _>>()?;

    let payload = CanonicalPayload::resolve(document, &scope)
        .chained(prior_bytes.iter().map(|sig| sig.as_bytes()));
    let signature = key.sign(&payload)?;

    tracing::debug!(
        signer = %signer,
        scope = %scope,
        position = prior.len(),
        payload_len = payload.len(),
        algorithm = key.algorithm(),
        "appended sequential signature"
    );

    let mut signatures = prior.to_vec();
    signatures.push(NodalSignature::signed(signer, scope, signature));
    Ok(SequentialSignature { signatures })
}

/// Verify every entry of `chain` against `document`.
///
/// `keys[k]` verifies `chain.signatures[k]`. Returns `Ok(false)` as soon as
/// one entry does not match.
///
/// # Errors
///
/// - [`SignatureError::LengthMismatch`] if `keys.len()` differs from the
///   chain length.
/// - [`SignatureError::ChainState`] if the chain is empty.
/// - [`SignatureError::Format`] if any entry is unsigned.
pub fn verify<V>(
    document: &Document,
    chain: &SequentialSignature,
    keys: &[V],
) -> Result<bool, SignatureError>
where
    V: PayloadVerifier,
{
    if chain.len() != keys.len() {
        return Err(SignatureError::LengthMismatch {
            signatures: chain.len(),
            keys: keys.len(),
        });
    }
    if chain.is_empty() {
        return Err(SignatureError::ChainState(
            "cannot verify a chain with no signatures".to_string(),
        ));
    }

    let sigs = chain
        .entries()
        .iter()
        .map(NodalSignature::require_signature)
        .collect::<Result<Vec<&SignatureBytes>, _>>()?;

    for (position, (entry, key)) in chain.entries().iter().zip(keys).enumerate().rev() {
        let payload = CanonicalPayload::resolve(document, &entry.scope)
            .chained(sigs[..position].iter().map(|sig| sig.as_bytes()));
        if !key.verify(&payload, sigs[position]) {
            tracing::warn!(
                signer = %entry.signer,
                position,
                chain_len = chain.len(),
                "sequential chain link failed verification"
            );
            return Ok(false);
        }
        tracing::debug!(
            signer = %entry.signer,
            position,
            payload_len = payload.len(),
            "chain link verified"
        );
    }

    tracing::info!(chain_len = chain.len(), "sequential chain verified");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use structsig_crypto::{Ed25519Signer, Ed25519Verifier};

    fn document() -> Document {
        Document::builder()
            .text("text1", "Hello")
            .text("text2", "World")
            .bytes("file1", vec![9u8; 16])
            .build()
            .unwrap()
    }

    fn signers(n: u8) -> Vec<Ed25519Signer> {
        (1..=n).map(|i| Ed25519Signer::from_seed(&[i; 32])).collect()
    }

    fn build_chain(
        doc: &Document,
        keys: &[Ed25519Signer],
        scopes: &[Scope],
    ) -> SequentialSignature {
        let mut chain: Option<SequentialSignature> = None;
        for (i, (key, scope)) in keys.iter().zip(scopes).enumerate() {
            let signer = format!("Signer{}", i + 1);
            let next = sign(signer, doc, scope.clone(), key, chain.as_ref()).unwrap();
            chain = Some(next);
        }
        chain.unwrap()
    }

    fn verifiers(keys: &[Ed25519Signer]) -> Vec<Ed25519Verifier> {
        keys.iter().map(Ed25519Signer::verifier).collect()
    }

    #[test]
    fn first_signer_creates_chain_of_one() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]);
        let chain = sign("Signer1", &document(), Scope::AllFields, &key, None).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.signers().collect::<Vec<_>>(), vec!["Signer1"]);
        assert!(verify(&document(), &chain, &[key.verifier()]).unwrap());
    }

    #[test]
    fn first_entry_equals_nodal_signature() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]);
        let doc = document();
        let scope = Scope::subset(["text1"]).unwrap();
        let chain = sign("S", &doc, scope.clone(), &key, None).unwrap();
        let nodal = crate::nodal::sign("S", &doc, scope, &key).unwrap();
        assert_eq!(chain.entries()[0], nodal);
    }

    #[test]
    fn input_chain_is_not_mutated() {
        let doc = document();
        let keys = signers(2);
        let first = sign("Signer1", &doc, Scope::AllFields, &keys[0], None).unwrap();
        let snapshot = first.clone();
        let second = sign("Signer2", &doc, Scope::AllFields, &keys[1], Some(&first)).unwrap();
        assert_eq!(first, snapshot);
        assert_eq!(second.len(), 2);
        assert_eq!(second.entries()[0], first.entries()[0]);
    }

    #[test]
    fn second_payload_binds_first_signature() {
        let doc = document();
        let keys = signers(2);
        let chain = build_chain(&doc, &keys, &[Scope::AllFields, Scope::AllFields]);
        let second = chain.entries()[1].signature_bytes().unwrap();
        let bare = CanonicalPayload::resolve(&doc, &Scope::AllFields);
        assert!(!keys[1].verifier().verify(&bare, second));
    }

    #[test]
    fn empty_chain_cannot_be_extended() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]);
        let empty = SequentialSignature::default();
        assert!(matches!(
            sign("S", &document(), Scope::AllFields, &key, Some(&empty)),
            Err(SignatureError::ChainState(_))
        ));
    }

    #[test]
    fn unsigned_prior_entry_is_chain_state() {
        let key = Ed25519Signer::from_seed(&[1u8; 32]);
        let chain = SequentialSignature {
            signatures: vec![NodalSignature::unsigned("Ghost", Scope::AllFields)],
        };
        assert!(matches!(
            sign("S", &document(), Scope::AllFields, &key, Some(&chain)),
            Err(SignatureError::ChainState(_))
        ));
    }

    #[test]
    fn empty_chain_cannot_be_verified() {
        let keys: Vec<Ed25519Verifier> = Vec::new();
        assert!(matches!(
            verify(&document(), &SequentialSignature::default(), &keys),
            Err(SignatureError::ChainState(_))
        ));
    }

    #[test]
    fn unsigned_entry_is_format_error_on_verify() {
        let doc = document();
        let keys = signers(2);
        let mut chain = build_chain(&doc, &keys, &[Scope::AllFields, Scope::AllFields]);
        chain.signatures[0] = NodalSignature::unsigned("Signer1", Scope::AllFields);
        assert!(matches!(
            verify(&doc, &chain, &verifiers(&keys)),
            Err(SignatureError::Format(_))
        ));
    }

    #[test]
    fn length_mismatch_is_checked_first() {
        let doc = document();
        let keys = signers(2);
        let chain = build_chain(&doc, &keys, &[Scope::AllFields, Scope::AllFields]);
        let err = verify(&doc, &chain, &verifiers(&keys[..1])).unwrap_err();
        assert!(matches!(
            err,
            SignatureError::LengthMismatch { signatures: 2, keys: 1 }
        ));
    }

    #[test]
    fn reordered_chain_fails() {
        let doc = document();
        let keys = signers(2);
        let mut chain = build_chain(&doc, &keys, &[Scope::AllFields, Scope::AllFields]);
        chain.signatures.swap(0, 1);
        let mut swapped = verifiers(&keys);
        swapped.swap(0, 1);
        assert!(!verify(&doc, &chain, &swapped).unwrap());
    }

    #[test]
    fn non_terminal_scope_tamper_is_detected() {
        let doc = document();
        let keys = signers(3);
        let mut chain = build_chain(
            &doc,
            &keys,
            &[
                Scope::subset(["text1"]).unwrap(),
                Scope::subset(["file1"]).unwrap(),
                Scope::AllFields,
            ],
        );
        chain.signatures[0].scope = Scope::subset(["text2"]).unwrap();
        assert!(!verify(&doc, &chain, &verifiers(&keys)).unwrap());
    }

    proptest! {
        #[test]
        fn chains_of_any_length_verify(len in 1u8..6) {
            let doc = document();
            let keys = signers(len);
            let scopes = vec![Scope::AllFields; usize::from(len)];
            let chain = build_chain(&doc, &keys, &scopes);
            prop_assert_eq!(chain.len(), usize::from(len));
            prop_assert!(verify(&doc, &chain, &verifiers(&keys)).unwrap());
        }
    }
}
