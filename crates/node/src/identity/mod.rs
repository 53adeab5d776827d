//! File-backed node and validator identities
//!
//! Both stores follow the same load-or-generate contract: an existing key
//! file is loaded and returned as-is, otherwise a key pair is produced from
//! the [`KeySource`] and committed with no-clobber semantics. Identity files
//! are never overwritten.

mod node_key;
mod privval;

pub use node_key::NodeKey;
pub use privval::{FilePv, LastSignState};

use crate::error::{InitError, InitResult};
use keystone_crypto::KeySource;
use keystone_types::fsutil;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::warn;

/// Outcome of a load-or-generate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The artifact already existed and was loaded
    Loaded,
    /// The artifact was absent and has been created by this call
    Generated,
}

impl Provisioned {
    pub fn is_generated(self) -> bool {
        self == Provisioned::Generated
    }
}

impl fmt::Display for Provisioned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provisioned::Loaded => f.write_str("loaded"),
            Provisioned::Generated => f.write_str("generated"),
        }
    }
}

/// Read an identity file, mapping "not found" to `None`.
pub(crate) fn read_existing(path: &Path) -> InitResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(InitError::fs(path, e)),
    }
}

/// Create the private directory holding `path`.
pub(crate) fn ensure_parent(path: &Path) -> InitResult<()> {
    let dir = fsutil::parent_dir(path);
    fsutil::ensure_dir(dir, fsutil::PRIVATE_DIR_MODE).map_err(|e| InitError::fs(dir, e))
}

/// Commit a new key file; fails if the file appeared in the meantime.
pub(crate) fn commit_new(path: &Path, contents: &[u8]) -> InitResult<()> {
    ensure_parent(path)?;
    fsutil::write_new_atomic(path, contents, fsutil::PRIVATE_FILE_MODE)
        .map_err(|e| InitError::fs(path, e))
}

pub(crate) fn warn_if_secret_ignored(source: &KeySource, path: &Path) {
    if source.is_deterministic() {
        warn!(
            path = %path.display(),
            "Identity already exists; ignoring supplied mnemonic"
        );
    }
}
