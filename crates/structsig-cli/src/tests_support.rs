//! Fixture access for handler tests. The PEM keys and the data file are
//! shared with the protocol crate's integration tests.

use std::path::PathBuf;

use crate::document::DocumentArgs;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("structsig-protocol")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// `{text1: "Hello", text2: "World", file1: <data>}`
pub fn fixture_document() -> DocumentArgs {
    DocumentArgs {
        texts: vec!["text1=Hello".into(), "text2=World".into()],
        files: vec![format!("file1={}", fixture("data").display())],
        document: None,
    }
}

/// The fixture document with `text1` changed.
pub fn tampered_document() -> DocumentArgs {
    DocumentArgs {
        texts: vec!["text1=Goodbye".into(), "text2=World".into()],
        ..fixture_document()
    }
}
