//! Cryptographic error types

use thiserror::Error;

/// Errors from key material handling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Recovery phrase failed the wordlist/checksum check
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The operating system random source could not supply entropy
    #[error("secure random source exhausted: {0}")]
    EntropyExhausted(String),

    /// Invalid public key bytes
    #[error("invalid public key bytes")]
    InvalidPublicKey,

    /// Invalid secret key bytes
    #[error("invalid secret key bytes: {0}")]
    InvalidSecretKey(String),
}
