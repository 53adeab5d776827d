//! Error types for mnemonic operations

use crate::error::CryptoError;
use thiserror::Error;

/// Result type for mnemonic operations
pub type MnemonicResult<T> = Result<T, MnemonicError>;

/// Errors that can occur during mnemonic operations
#[derive(Debug, Error)]
pub enum MnemonicError {
    /// Invalid mnemonic phrase (wrong word count, unknown words or bad checksum)
    #[error("invalid mnemonic phrase: {0}")]
    InvalidPhrase(String),

    /// Unsupported word count requested for generation
    #[error("invalid word count: {0} (must be 12, 15, 18, 21, or 24)")]
    InvalidWordCount(usize),

    /// Entropy generation failed
    #[error("entropy generation failed: {0}")]
    EntropyError(String),
}

impl From<bip39::Error> for MnemonicError {
    fn from(err: bip39::Error) -> Self {
        MnemonicError::InvalidPhrase(err.to_string())
    }
}

impl From<MnemonicError> for CryptoError {
    fn from(err: MnemonicError) -> Self {
        match err {
            MnemonicError::EntropyError(msg) => CryptoError::EntropyExhausted(msg),
            other => CryptoError::InvalidMnemonic(other.to_string()),
        }
    }
}
