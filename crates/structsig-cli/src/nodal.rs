//! # Nodal Subcommand
//!
//! `structsig nodal sign | verify | import`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use structsig_crypto::pem::{load_signer, load_verifier};
use structsig_protocol::store::{self, SignatureStore};
use structsig_protocol::{nodal, NodalSignature};

use crate::document::DocumentArgs;
use crate::{emit, parse_scope, EXIT_INVALID, EXIT_OK};

/// Arguments for `structsig nodal`.
#[derive(Args, Debug)]
pub struct NodalArgs {
    #[command(subcommand)]
    pub command: NodalCommand,
}

/// Nodal signature subcommands.
#[derive(Subcommand, Debug)]
pub enum NodalCommand {
    /// Sign a document as one signer over an optional scope.
    Sign {
        /// Signer name, also the output file stem.
        #[arg(long)]
        signer: String,
        /// PKCS#8 PEM private key.
        #[arg(long)]
        key: PathBuf,
        /// Comma-separated field keys to cover. Omit to cover every field;
        /// pass `""` to cover none.
        #[arg(long, value_delimiter = ',')]
        scope: Option<Vec<String>>,
        #[command(flatten)]
        document: DocumentArgs,
        /// Write `<signer>.sig` and `<signer>.nodalsig` here instead of
        /// printing the record.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Verify a `.nodalsig` record against a document.
    Verify {
        /// The `.nodalsig` file.
        #[arg(long)]
        signature: PathBuf,
        /// Signer's X.509 certificate or SPKI public key (PEM).
        #[arg(long)]
        cert: PathBuf,
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// Wrap a raw `.sig` blob into a nodal record.
    Import {
        /// Signer name recorded in the output.
        #[arg(long)]
        signer: String,
        /// The raw signature file.
        #[arg(long)]
        raw: PathBuf,
        /// Comma-separated field keys the signature covers. Omit for every
        /// field; pass `""` for none.
        #[arg(long, value_delimiter = ',')]
        scope: Option<Vec<String>>,
        /// Write `<signer>.nodalsig` here instead of printing the record.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// Execute the nodal subcommand.
pub fn run_nodal(args: &NodalArgs) -> Result<u8> {
    match &args.command {
        NodalCommand::Sign {
            signer,
            key,
            scope,
            document,
            out_dir,
        } => cmd_sign(signer, key, scope.as_deref(), document, out_dir.as_deref()),
        NodalCommand::Verify {
            signature,
            cert,
            document,
        } => cmd_verify(signature, cert, document),
        NodalCommand::Import {
            signer,
            raw,
            scope,
            out_dir,
        } => cmd_import(signer, raw, scope.as_deref(), out_dir.as_deref()),
    }
}

fn cmd_sign(
    signer: &str,
    key_path: &Path,
    scope: Option<&[String]>,
    document: &DocumentArgs,
    out_dir: Option<&Path>,
) -> Result<u8> {
    let scope = parse_scope(scope)?;
    let document = document.load()?;
    let key = load_signer(key_path)
        .with_context(|| format!("failed to load private key: {}", key_path.display()))?;

    let signature = nodal::sign(signer, &document, scope, &key)?;
    emit(
        serde_json::to_string_pretty(&signature)?,
        out_dir,
        |out: &SignatureStore| out.write_nodal(&signature),
    )
}

fn cmd_verify(signature_path: &Path, cert_path: &Path, document: &DocumentArgs) -> Result<u8> {
    let signature = store::read_nodal(signature_path)
        .with_context(|| format!("failed to read signature: {}", signature_path.display()))?;
    let document = document.load()?;
    let cert = load_verifier(cert_path)
        .with_context(|| format!("failed to load certificate: {}", cert_path.display()))?;

    if nodal::verify(&document, &signature, &cert)? {
        println!("OK: nodal signature by {} is valid", signature.signer);
        Ok(EXIT_OK)
    } else {
        println!("FAIL: nodal signature by {} does not verify", signature.signer);
        Ok(EXIT_INVALID)
    }
}

fn cmd_import(
    signer: &str,
    raw_path: &Path,
    scope: Option<&[String]>,
    out_dir: Option<&Path>,
) -> Result<u8> {
    let scope = parse_scope(scope)?;
    let signature: NodalSignature = store::nodal_from_raw_file(signer, raw_path, scope)
        .with_context(|| format!("failed to import raw signature: {}", raw_path.display()))?;
    emit(
        serde_json::to_string_pretty(&signature)?,
        out_dir,
        |out: &SignatureStore| out.write_nodal(&signature),
    )
}
