//! Mnemonic phrase generation and parsing

use super::error::{MnemonicError, MnemonicResult};
use crate::secure::SecretBytes;
use bip39::Mnemonic as Bip39Mnemonic;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretBox, SecretString};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Word count of phrases produced by [`Mnemonic::generate`]
pub const DEFAULT_WORD_COUNT: usize = 24;

/// Normalize a phrase: trim, lower-case, collapse whitespace runs.
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// BIP-39 mnemonic phrase wrapper
///
/// The phrase is stored as a SecretString to prevent accidental logging and
/// is zeroized on drop. `Debug` never prints the words.
#[derive(ZeroizeOnDrop)]
pub struct Mnemonic {
    #[zeroize(skip)] // bip39::Mnemonic doesn't impl Zeroize
    inner: Bip39Mnemonic,
    phrase: SecretString,
}

impl Mnemonic {
    /// Generate a new random 24-word (256-bit entropy) mnemonic
    pub fn generate() -> MnemonicResult<Self> {
        Self::generate_with_word_count(DEFAULT_WORD_COUNT)
    }

    /// Generate a mnemonic with a specific word count (12, 15, 18, 21 or 24)
    pub fn generate_with_word_count(word_count: usize) -> MnemonicResult<Self> {
        let entropy_bytes = word_count_to_entropy_bytes(word_count)?;

        let mut entropy = vec![0u8; entropy_bytes];
        OsRng
            .try_fill_bytes(&mut entropy)
            .map_err(|e| MnemonicError::EntropyError(e.to_string()))?;

        let mnemonic = Bip39Mnemonic::from_entropy(&entropy);
        entropy.zeroize();
        let mnemonic = mnemonic?;

        let phrase = mnemonic.to_string();
        Ok(Self {
            inner: mnemonic,
            phrase: phrase.into(),
        })
    }

    /// Import a mnemonic from an existing phrase
    ///
    /// # Errors
    ///
    /// Returns `MnemonicError::InvalidPhrase` if the phrase contains unknown
    /// words, has an unsupported word count or fails the checksum.
    pub fn from_phrase(phrase: &str) -> MnemonicResult<Self> {
        let normalized = normalize_phrase(phrase);
        let mnemonic = Bip39Mnemonic::parse_normalized(&normalized)?;

        Ok(Self {
            phrase: normalized.into(),
            inner: mnemonic,
        })
    }

    /// Validate that a phrase is a valid BIP-39 mnemonic
    pub fn validate(phrase: &str) -> MnemonicResult<()> {
        Bip39Mnemonic::parse_normalized(&normalize_phrase(phrase))?;
        Ok(())
    }

    /// Get the normalized phrase
    ///
    /// The returned reference should be used immediately and not stored.
    pub fn phrase(&self) -> &str {
        self.phrase.expose_secret()
    }

    /// Get the number of words in the mnemonic
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Secret bytes fed to key derivation (the normalized phrase)
    pub fn secret_bytes(&self) -> SecretBytes {
        SecretBox::new(Box::new(self.phrase().as_bytes().to_vec()))
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

fn word_count_to_entropy_bytes(word_count: usize) -> MnemonicResult<usize> {
    match word_count {
        12 => Ok(16),
        15 => Ok(20),
        18 => Ok(24),
        21 => Ok(28),
        24 => Ok(32),
        _ => Err(MnemonicError::InvalidWordCount(word_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_24_word_mnemonic() {
        let mnemonic = Mnemonic::generate().unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert_eq!(mnemonic.phrase().split(' ').count(), 24);
    }

    #[test]
    fn test_generate_12_word_mnemonic() {
        let mnemonic = Mnemonic::generate_with_word_count(12).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(Mnemonic::validate(mnemonic.phrase()).is_ok());
    }

    #[test]
    fn test_from_phrase_valid() {
        let mnemonic = Mnemonic::from_phrase(ABANDON).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert_eq!(mnemonic.phrase(), ABANDON);
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace_and_case() {
        let messy = "  ABANDON  abandon\tAbandon abandon abandon abandon abandon abandon abandon abandon abandon about \n";
        let mnemonic = Mnemonic::from_phrase(messy).unwrap();
        assert_eq!(mnemonic.phrase(), ABANDON);
        assert_eq!(
            mnemonic.secret_bytes().expose_secret().as_slice(),
            ABANDON.as_bytes()
        );
    }

    #[test]
    fn test_invalid_phrase() {
        assert!(matches!(
            Mnemonic::from_phrase("this is not a valid mnemonic phrase at all"),
            Err(MnemonicError::InvalidPhrase(_))
        ));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(Mnemonic::validate(bad).is_err());
    }

    #[test]
    fn test_debug_output_redacted() {
        let mnemonic = Mnemonic::from_phrase(ABANDON).unwrap();
        let debug = format!("{:?}", mnemonic);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("abandon"));
    }

    #[test]
    fn test_invalid_word_count() {
        assert!(matches!(
            Mnemonic::generate_with_word_count(13),
            Err(MnemonicError::InvalidWordCount(13))
        ));
    }
}
