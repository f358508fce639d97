//! # Signature Files
//!
//! Persists signatures into an output directory, one set of files per
//! signer:
//!
//! | File               | Content                                   |
//! |--------------------|-------------------------------------------|
//! | `<signer>.sig`     | raw signature bytes                       |
//! | `<signer>.nodalsig`| JSON nodal record                         |
//! | `<signer>.seqsig`  | JSON sequential record (the whole chain)  |
//!
//! The raw blob lets tools that only speak bare signatures consume the
//! output; [`nodal_from_raw_file()`] turns such a blob back into a record.
//! Existing files are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use structsig_core::Scope;
use structsig_crypto::SignatureBytes;

use crate::error::SignatureError;
use crate::record::{NodalRecord, NodalSignature, SequentialRecord, SequentialSignature};

/// Extension of raw signature blobs.
pub const RAW_EXTENSION: &str = "sig";
/// Extension of nodal records.
pub const NODAL_EXTENSION: &str = "nodalsig";
/// Extension of sequential records.
pub const SEQUENTIAL_EXTENSION: &str = "seqsig";

/// Reject signer names that cannot safely become a file stem.
fn validate_signer(signer: &str) -> Result<(), SignatureError> {
    if signer.is_empty() {
        return Err(SignatureError::Format("signer name is empty".into()));
    }
    if signer == "." || signer == ".." || signer.contains(['/', '\\', '\0']) {
        return Err(SignatureError::Format(format!(
            "signer name {signer:?} cannot be used as a file name"
        )));
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SignatureError + '_ {
    move |source| SignatureError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// A directory that receives signature files.
#[derive(Debug, Clone)]
pub struct SignatureStore {
    root: PathBuf,
}

impl SignatureStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created on the first write if it does not exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of `<signer>.<extension>` under the root.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Format`] for an empty signer name or one
    /// containing a path separator.
    pub fn path_for(&self, signer: &str, extension: &str) -> Result<PathBuf, SignatureError> {
        validate_signer(signer)?;
        Ok(self.root.join(format!("{signer}.{extension}")))
    }

    fn write(
        &self,
        signer: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, SignatureError> {
        let path = self.path_for(signer, extension)?;
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        fs::write(&path, bytes).map_err(io_error(&path))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote signature file");
        Ok(path)
    }

    /// Write the raw signature blob `<signer>.sig`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Format`] for an unusable signer name and
    /// [`SignatureError::Io`] if the write fails.
    pub fn write_raw(
        &self,
        signer: &str,
        signature: &SignatureBytes,
    ) -> Result<PathBuf, SignatureError> {
        self.write(signer, RAW_EXTENSION, signature.as_bytes())
    }

    /// Write `<signer>.sig` and `<signer>.nodalsig` for a signed record.
    ///
    /// Returns the path of the `.nodalsig` file.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Format`] if the record is unsigned, plus
    /// the errors of [`SignatureStore::write_raw()`].
    pub fn write_nodal(&self, signature: &NodalSignature) -> Result<PathBuf, SignatureError> {
        let raw = signature.require_signature()?;
        self.write_raw(&signature.signer, raw)?;
        let json = serde_json::to_vec(signature)?;
        self.write(&signature.signer, NODAL_EXTENSION, &json)
    }

    /// Write the newest entry's `<signer>.sig` and the whole chain as
    /// `<signer>.seqsig`, where `signer` is the newest entry's signer.
    ///
    /// Returns the path of the `.seqsig` file.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::ChainState`] for an empty chain and
    /// [`SignatureError::Format`] if the newest entry is unsigned.
    pub fn write_sequential(
        &self,
        chain: &SequentialSignature,
    ) -> Result<PathBuf, SignatureError> {
        let last = chain.last().ok_or_else(|| {
            SignatureError::ChainState("cannot store a chain with no signatures".into())
        })?;
        let raw = last.require_signature()?;
        self.write_raw(&last.signer, raw)?;
        let json = serde_json::to_vec(chain)?;
        self.write(&last.signer, SEQUENTIAL_EXTENSION, &json)
    }
}

/// Read a `.nodalsig` file.
///
/// # Errors
///
/// Returns [`SignatureError::Io`] if the file cannot be read,
/// [`SignatureError::Serialization`] if it is not a nodal record, and
/// [`SignatureError::Format`] for malformed hex or scope keys.
pub fn read_nodal(path: &Path) -> Result<NodalSignature, SignatureError> {
    let json = fs::read_to_string(path).map_err(io_error(path))?;
    let record: NodalRecord = serde_json::from_str(&json)?;
    NodalSignature::try_from(record)
}

/// Read a `.seqsig` file.
///
/// # Errors
///
/// Same as [`read_nodal()`], for sequential records.
pub fn read_sequential(path: &Path) -> Result<SequentialSignature, SignatureError> {
    let json = fs::read_to_string(path).map_err(io_error(path))?;
    let record: SequentialRecord = serde_json::from_str(&json)?;
    SequentialSignature::try_from(record)
}

/// Build a nodal record from a raw signature blob produced elsewhere.
///
/// # Errors
///
/// Returns [`SignatureError::Io`] if the blob cannot be read and
/// [`SignatureError::Format`] if it is empty.
pub fn nodal_from_raw_file(
    signer: impl Into<String>,
    path: &Path,
    scope: Scope,
) -> Result<NodalSignature, SignatureError> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    if bytes.is_empty() {
        return Err(SignatureError::Format(format!(
            "raw signature file {} is empty",
            path.display()
        )));
    }
    Ok(NodalSignature::signed(signer, scope, SignatureBytes::new(bytes)))
}
