//! Shared fixtures: two Ed25519 signers with self-signed certificates and
//! the three-field document `{text1: "Hello", text2: "World", file1: data}`.

#![allow(dead_code)]

use std::path::PathBuf;

use structsig_core::Document;
use structsig_crypto::pem::{load_signer, load_verifier};
use structsig_crypto::{Ed25519Signer, Ed25519Verifier};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn document() -> Document {
    let data = std::fs::read(fixture("data")).expect("fixture data file");
    Document::builder()
        .text("text1", "Hello")
        .text("text2", "World")
        .bytes("file1", data)
        .build()
        .expect("fixture document")
}

pub fn s1_key() -> Ed25519Signer {
    load_signer(&fixture("s1-priv.pem")).expect("s1 private key")
}

pub fn s2_key() -> Ed25519Signer {
    load_signer(&fixture("s2-priv.pem")).expect("s2 private key")
}

pub fn s1_cert() -> Ed25519Verifier {
    load_verifier(&fixture("s1-cert.pem")).expect("s1 certificate")
}

pub fn s2_cert() -> Ed25519Verifier {
    load_verifier(&fixture("s2-cert.pem")).expect("s2 certificate")
}
