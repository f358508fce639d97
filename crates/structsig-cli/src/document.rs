//! # Document Inputs
//!
//! Assembles the document to sign or verify from command-line inputs:
//! inline text fields, fields read from files, and a transport document
//! (`{"items": [{"key", "value": base64}]}`). All sources merge into one
//! document; a key supplied twice is an error.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use structsig_core::{Document, Field, TransportDocument};

/// Document input flags shared by every signing and verifying command.
#[derive(Args, Debug, Default, Clone)]
pub struct DocumentArgs {
    /// Text field as `key=value`. Repeatable.
    #[arg(long = "text", value_name = "KEY=VALUE")]
    pub texts: Vec<String>,

    /// Field whose value is the content of a file, as `key=path`. Repeatable.
    #[arg(long = "file", value_name = "KEY=PATH")]
    pub files: Vec<String>,

    /// Transport document JSON with base64 field values.
    #[arg(long, value_name = "FILE")]
    pub document: Option<PathBuf>,
}

impl DocumentArgs {
    /// Build the document from every supplied source.
    pub fn load(&self) -> Result<Document> {
        let mut document = match &self.document {
            Some(path) => read_transport(path)?,
            None => Document::default(),
        };

        for entry in &self.texts {
            let (key, value) = split_pair(entry, "--text")?;
            document
                .insert(Field::text(key, value))
                .with_context(|| format!("invalid --text {entry:?}"))?;
        }

        for entry in &self.files {
            let (key, path) = split_pair(entry, "--file")?;
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read field file: {path}"))?;
            document
                .insert(Field::new(key, bytes))
                .with_context(|| format!("invalid --file {entry:?}"))?;
        }

        if document.is_empty() {
            bail!("no document fields given; use --text, --file, or --document");
        }
        tracing::debug!(fields = document.len(), "assembled document");
        Ok(document)
    }
}

fn split_pair<'a>(entry: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match entry.split_once('=') {
        Some(pair) => Ok(pair),
        None => bail!("{flag} expects KEY=VALUE, got {entry:?}"),
    }
}

fn read_transport(path: &Path) -> Result<Document> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document: {}", path.display()))?;
    let transport = TransportDocument::from_json(&json)
        .with_context(|| format!("failed to parse document: {}", path.display()))?;
    Document::from_transport(&transport)
        .with_context(|| format!("failed to decode document: {}", path.display()))
}
