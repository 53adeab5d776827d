//! Key material for Keystone node identities
//!
//! This crate provides:
//! - Ed25519 key pairs for the transport (node) and consensus (validator) identities
//! - BIP-39 mnemonic validation and generation
//! - Key-derivation strategies: from an operator secret or from OS entropy
//! - The codec between crypto-layer keys and the wire-form `PubKey`

pub mod codec;
pub mod derive;
pub mod ed25519;
pub mod error;
pub mod mnemonic;
pub mod secure;

pub use codec::pubkey_to_wire;
pub use derive::{derive_from_secret, generate_random, KeySource};
pub use ed25519::{
    Ed25519KeyPair, Ed25519PublicKey, Ed25519SecretKey, Ed25519Signature, KEYPAIR_BYTES_LEN,
};
pub use error::CryptoError;
pub use mnemonic::{Mnemonic, MnemonicError};
pub use secure::{IntoSecret, SecretBytes, SecretString};

pub use secrecy::ExposeSecret;
