//! # structsig-cli — Command-Line Front End
//!
//! Provides the `structsig` command:
//!
//! ```bash
//! structsig nodal sign --signer Signer1 --key s1-priv.pem \
//!     --text text1=Hello --file file1=data --scope file1,text1 --out-dir out
//! structsig nodal verify --signature out/Signer1.nodalsig --cert s1-cert.pem \
//!     --text text1=Hello --file file1=data
//! structsig seq sign --signer Signer2 --key s2-priv.pem \
//!     --chain out/Signer1.seqsig --document doc.json --out-dir out
//! structsig seq verify --chain out/Signer2.seqsig \
//!     --cert s1-cert.pem --cert s2-cert.pem --document doc.json
//! ```
//!
//! Each handler returns the process status: `0` for success or a valid
//! signature, `1` for a signature that does not verify. Errors propagate
//! as `anyhow::Error` and `main` maps them to status `2`.

pub mod document;
pub mod nodal;
pub mod sequential;

#[cfg(test)]
pub(crate) mod tests_support;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use structsig_core::Scope;
use structsig_protocol::{SignatureError, SignatureStore};

/// Status for a successful command or a valid signature.
pub const EXIT_OK: u8 = 0;
/// Status for a signature that does not verify.
pub const EXIT_INVALID: u8 = 1;
/// Status for any error.
pub const EXIT_ERROR: u8 = 2;

/// Turn the `--scope` list into a [`Scope`].
///
/// Absent means every field. A single empty value (`--scope ""`) means no
/// field at all.
pub fn parse_scope(keys: Option<&[String]>) -> Result<Scope> {
    let keys: Option<Vec<String>> =
        keys.map(|keys| keys.iter().map(|k| k.trim().to_string()).collect());
    if matches!(keys.as_deref(), Some([only]) if only.is_empty()) {
        return Ok(Scope::empty());
    }
    Scope::from_keys(keys).context("invalid --scope")
}

/// Print the record JSON, or persist it with `write` when `out_dir` is set.
fn emit<F>(json: String, out_dir: Option<&Path>, write: F) -> Result<u8>
where
    F: FnOnce(&SignatureStore) -> Result<PathBuf, SignatureError>,
{
    match out_dir {
        Some(dir) => {
            let path = write(&SignatureStore::new(dir))
                .with_context(|| format!("failed to write signature into {}", dir.display()))?;
            println!("OK: wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(EXIT_OK)
}
