//! BIP-39 recovery phrases
//!
//! A phrase is accepted only if every word is in the English wordlist and
//! the checksum holds. Validation runs on the normalized form: surrounding
//! whitespace trimmed, lower-cased, words separated by a single space.
//! The normalized phrase is also the secret that key derivation hashes, so
//! two spellings of the same phrase recover the same keys.
//!
//! Tendermint-derived tooling hashes the phrase exactly as typed. A phrase
//! given there with extra spaces or upper-case letters therefore recovers a
//! different key pair than it does here. Only phrases already in canonical
//! form (lower-case, single-spaced, no surrounding whitespace) produce the
//! same keys in both.
//!
//! ```rust
//! use keystone_crypto::mnemonic::Mnemonic;
//!
//! let mnemonic = Mnemonic::generate().unwrap();
//! assert_eq!(mnemonic.word_count(), 24);
//! assert!(Mnemonic::validate(mnemonic.phrase()).is_ok());
//! ```

mod error;
mod generate;

pub use error::{MnemonicError, MnemonicResult};
pub use generate::{normalize_phrase, Mnemonic, DEFAULT_WORD_COUNT};
