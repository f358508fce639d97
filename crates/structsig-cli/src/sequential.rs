//! # Sequential Subcommand
//!
//! `structsig seq sign | verify`. A chain is extended by passing the
//! previous signer's `.seqsig` file with `--chain`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use structsig_crypto::pem::{load_signer, load_verifier};
use structsig_protocol::sequential;
use structsig_protocol::store::{self, SignatureStore};

use crate::document::DocumentArgs;
use crate::{emit, parse_scope, EXIT_INVALID, EXIT_OK};

/// Arguments for `structsig seq`.
#[derive(Args, Debug)]
pub struct SequentialArgs {
    #[command(subcommand)]
    pub command: SequentialCommand,
}

/// Sequential signature subcommands.
#[derive(Subcommand, Debug)]
pub enum SequentialCommand {
    /// Append a signature to a chain, or start a new chain.
    Sign {
        /// Signer name, also the output file stem.
        #[arg(long)]
        signer: String,
        /// PKCS#8 PEM private key.
        #[arg(long)]
        key: PathBuf,
        /// Previous signer's `.seqsig`. Omit for the first signer.
        #[arg(long)]
        chain: Option<PathBuf>,
        /// Comma-separated field keys to cover. Omit to cover every field;
        /// pass `""` to cover none.
        #[arg(long, value_delimiter = ',')]
        scope: Option<Vec<String>>,
        #[command(flatten)]
        document: DocumentArgs,
        /// Write `<signer>.sig` and `<signer>.seqsig` here instead of
        /// printing the chain.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Verify every entry of a `.seqsig` chain.
    Verify {
        /// The `.seqsig` file.
        #[arg(long)]
        chain: PathBuf,
        /// Certificates or SPKI public keys, one per entry, in signing order.
        #[arg(long = "cert", required = true)]
        certs: Vec<PathBuf>,
        #[command(flatten)]
        document: DocumentArgs,
    },
}

/// Execute the sequential subcommand.
pub fn run_sequential(args: &SequentialArgs) -> Result<u8> {
    match &args.command {
        SequentialCommand::Sign {
            signer,
            key,
            chain,
            scope,
            document,
            out_dir,
        } => cmd_sign(
            signer,
            key,
            chain.as_deref(),
            scope.as_deref(),
            document,
            out_dir.as_deref(),
        ),
        SequentialCommand::Verify {
            chain,
            certs,
            document,
        } => cmd_verify(chain, certs, document),
    }
}

fn cmd_sign(
    signer: &str,
    key_path: &Path,
    chain_path: Option<&Path>,
    scope: Option<&[String]>,
    document: &DocumentArgs,
    out_dir: Option<&Path>,
) -> Result<u8> {
    let scope = parse_scope(scope)?;
    let document = document.load()?;
    let key = load_signer(key_path)
        .with_context(|| format!("failed to load private key: {}", key_path.display()))?;
    let prior = chain_path
        .map(|path| {
            store::read_sequential(path)
                .with_context(|| format!("failed to read chain: {}", path.display()))
        })
        .transpose()?;

    let chain = sequential::sign(signer, &document, scope, &key, prior.as_ref())?;
    tracing::info!(signer, chain_len = chain.len(), "signed sequential chain");
    emit(
        serde_json::to_string_pretty(&chain)?,
        out_dir,
        |out: &SignatureStore| out.write_sequential(&chain),
    )
}

fn cmd_verify(chain_path: &Path, cert_paths: &[PathBuf], document: &DocumentArgs) -> Result<u8> {
    let chain = store::read_sequential(chain_path)
        .with_context(|| format!("failed to read chain: {}", chain_path.display()))?;
    let document = document.load()?;
    let certs = cert_paths
        .iter()
        .map(|path| {
            load_verifier(path)
                .with_context(|| format!("failed to load certificate: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let signers = chain.signers().collect::<Vec<_>>().join(" -> ");
    if sequential::verify(&document, &chain, &certs)? {
        println!("OK: sequential chain [{signers}] is valid");
        Ok(EXIT_OK)
    } else {
        println!("FAIL: sequential chain [{signers}] does not verify");
        Ok(EXIT_INVALID)
    }
}
