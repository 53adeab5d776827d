//! Key-derivation strategies
//!
//! A key pair comes either from an operator-supplied secret (deterministic)
//! or from the operating system's random source. Derivation from a secret
//! is `seed = SHA-256(secret)`, then Ed25519 from that seed.

use crate::ed25519::{Ed25519KeyPair, Ed25519SecretKey};
use crate::error::CryptoError;
use crate::mnemonic::Mnemonic;
use crate::secure::SecretBytes;
use rand::rngs::OsRng;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Where identity key material comes from.
#[derive(Debug)]
pub enum KeySource {
    /// Derive deterministically from secret bytes
    FromSecret(SecretBytes),
    /// Draw fresh entropy from the OS
    Random,
}

impl KeySource {
    /// Build a key source from an optional recovery phrase.
    ///
    /// Only the empty phrase means no mnemonic was requested and yields
    /// [`KeySource::Random`] without validation. Anything else, including a
    /// whitespace-only phrase, must be a valid BIP-39 phrase.
    pub fn from_mnemonic_phrase(phrase: &str) -> Result<Self, CryptoError> {
        if phrase.is_empty() {
            return Ok(KeySource::Random);
        }
        let mnemonic = Mnemonic::from_phrase(phrase)?;
        Ok(KeySource::FromSecret(mnemonic.secret_bytes()))
    }

    /// Whether this source is derived from an operator secret
    pub fn is_deterministic(&self) -> bool {
        matches!(self, KeySource::FromSecret(_))
    }

    /// Produce the key pair for this source
    pub fn keypair(&self) -> Result<Ed25519KeyPair, CryptoError> {
        match self {
            KeySource::FromSecret(secret) => Ok(derive_from_secret(secret.expose_secret())),
            KeySource::Random => generate_random(),
        }
    }
}

/// Deterministically derive a key pair: seed = SHA-256(secret).
pub fn derive_from_secret(secret: &[u8]) -> Ed25519KeyPair {
    let mut seed: [u8; 32] = Sha256::digest(secret).into();
    let secret_key = Ed25519SecretKey::from_seed(&seed);
    seed.zeroize();
    Ed25519KeyPair::from_secret_key(secret_key)
}

/// Generate a key pair from 32 bytes of OS entropy.
pub fn generate_random() -> Result<Ed25519KeyPair, CryptoError> {
    Ed25519KeyPair::try_generate(&mut OsRng)
}
