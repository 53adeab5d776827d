//! Identity bootstrap errors

use keystone_crypto::CryptoError;
use keystone_types::GenesisError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for provisioning operations
pub type InitResult<T> = Result<T, InitError>;

/// Errors raised while provisioning node and validator identity
#[derive(Debug, Error)]
pub enum InitError {
    /// A non-empty recovery phrase failed validation
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Reading, writing or creating a path failed
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An identity artifact exists but cannot be used
    #[error("corrupt identity file {}: {reason}", path.display())]
    CorruptIdentityFile { path: PathBuf, reason: String },

    /// Key bytes rejected outside of any identity file
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(#[source] CryptoError),

    /// The OS random source failed
    #[error("secure random source exhausted: {0}")]
    EntropyExhausted(String),

    #[error(transparent)]
    Genesis(#[from] GenesisError),
}

impl InitError {
    pub(crate) fn fs(path: &Path, source: io::Error) -> Self {
        InitError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl fmt::Display) -> Self {
        InitError::CorruptIdentityFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl From<CryptoError> for InitError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidMnemonic(msg) => InitError::InvalidMnemonic(msg),
            CryptoError::EntropyExhausted(msg) => InitError::EntropyExhausted(msg),
            // Errors read from an identity file are mapped with `corrupt` at the call site.
            other => InitError::InvalidKeyMaterial(other),
        }
    }
}
