//! Ed25519 keys for node and validator identities
//!
//! Both the transport identity (node key) and the consensus identity
//! (validator key) are Ed25519 key pairs. Identifiers are derived from the
//! public key:
//! - NodeId: hex(sha256(pubkey)[..20])
//! - Address: HEX(sha256(pubkey)[..20])
//!
//! On disk a secret key is stored in the 64-byte `seed || pubkey` layout
//! used by the consensus engine's key files.

use crate::error::CryptoError;
use ed25519_consensus::{
    Signature as Ed25519Sig, SigningKey as Ed25519Secret, VerificationKey as Ed25519Pubkey,
};
use keystone_types::{Address, NodeId};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Length of the on-disk secret key layout (seed followed by public key)
pub const KEYPAIR_BYTES_LEN: usize = 64;

/// Ed25519 secret key (32 bytes seed)
#[derive(Clone)]
pub struct Ed25519SecretKey(Ed25519Secret);

impl Ed25519SecretKey {
    /// Generate a new random secret key
    ///
    /// Fails only if the random source cannot deliver entropy.
    pub fn try_generate<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, CryptoError> {
        let mut seed = [0u8; 32];
        rng.try_fill_bytes(&mut seed)
            .map_err(|e| CryptoError::EntropyExhausted(e.to_string()))?;
        let key = Self::from_seed(&seed);
        seed.zeroize();
        Ok(key)
    }

    /// Create from seed bytes (32 bytes)
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self(Ed25519Secret::from(*seed))
    }

    /// Load from the 64-byte `seed || pubkey` layout
    ///
    /// The trailing public key must match the one derived from the seed.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != KEYPAIR_BYTES_LEN {
            return Err(CryptoError::InvalidSecretKey(format!(
                "expected {} bytes, got {}",
                KEYPAIR_BYTES_LEN,
                bytes.len()
            )));
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes[..32]);
        let key = Self::from_seed(&seed);
        seed.zeroize();

        if key.public_key().to_bytes()[..] != bytes[32..] {
            return Err(CryptoError::InvalidSecretKey(
                "embedded public key does not match seed".to_string(),
            ));
        }
        Ok(key)
    }

    /// Serialize to bytes (32-byte seed)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Serialize to the 64-byte `seed || pubkey` layout
    pub fn to_keypair_bytes(&self) -> [u8; KEYPAIR_BYTES_LEN] {
        let mut out = [0u8; KEYPAIR_BYTES_LEN];
        out[..32].copy_from_slice(&self.0.to_bytes());
        out[32..].copy_from_slice(&self.public_key().to_bytes());
        out
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verification_key())
    }

    /// Sign a message
    pub fn sign(&self, msg: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.0.sign(msg))
    }
}

impl std::fmt::Debug for Ed25519SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Ed25519 public key (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey(Ed25519Pubkey);

impl Ed25519PublicKey {
    /// Load from bytes (32 bytes)
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        Ed25519Pubkey::try_from(*bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to bytes (32 bytes)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Verify a signature
    pub fn verify(&self, msg: &[u8], sig: &Ed25519Signature) -> bool {
        self.0.verify(&sig.0, msg).is_ok()
    }

    /// Transport node id of this key
    pub fn node_id(&self) -> NodeId {
        NodeId::from_pubkey_bytes(&self.to_bytes())
    }

    /// Validator address of this key
    pub fn address(&self) -> Address {
        Address::from_pubkey_bytes(&self.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Ed25519PublicKey({})", hex::encode(&bytes[..8]))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("invalid public key length"))?;
        Self::from_bytes(&arr).map_err(serde::de::Error::custom)
    }
}

/// Ed25519 signature (64 bytes)
#[derive(Clone)]
pub struct Ed25519Signature(Ed25519Sig);

impl Ed25519Signature {
    /// Serialize to bytes (64 bytes)
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Ed25519Signature({})", hex::encode(&bytes[..8]))
    }
}

/// Ed25519 key pair (convenience wrapper)
#[derive(Clone)]
pub struct Ed25519KeyPair {
    pub secret_key: Ed25519SecretKey,
    pub public_key: Ed25519PublicKey,
}

impl Ed25519KeyPair {
    /// Generate a new random key pair
    pub fn try_generate<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, CryptoError> {
        Ed25519SecretKey::try_generate(rng).map(Self::from_secret_key)
    }

    /// Create from secret key
    pub fn from_secret_key(secret_key: Ed25519SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Sign a message
    pub fn sign(&self, msg: &[u8]) -> Ed25519Signature {
        self.secret_key.sign(msg)
    }

    /// Transport node id of this key pair
    pub fn node_id(&self) -> NodeId {
        self.public_key.node_id()
    }

    /// Validator address of this key pair
    pub fn address(&self) -> Address {
        self.public_key.address()
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_keypair() -> Ed25519KeyPair {
        Ed25519KeyPair::try_generate(&mut rand::thread_rng()).unwrap()
    }

    #[test]
    fn test_sign_verify() {
        let keypair = random_keypair();
        let msg = b"test message";
        let sig = keypair.sign(msg);
        assert!(keypair.public_key.verify(msg, &sig));
        assert!(!keypair.public_key.verify(b"wrong message", &sig));
    }

    #[test]
    fn test_keypair_bytes_roundtrip() {
        let keypair = random_keypair();
        let bytes = keypair.secret_key.to_keypair_bytes();
        assert_eq!(&bytes[32..], &keypair.public_key.to_bytes());

        let restored = Ed25519SecretKey::from_keypair_bytes(&bytes).unwrap();
        assert_eq!(restored.to_bytes(), keypair.secret_key.to_bytes());
    }

    #[test]
    fn test_keypair_bytes_reject_mismatched_pubkey() {
        let keypair = random_keypair();
        let mut bytes = keypair.secret_key.to_keypair_bytes();
        bytes[40] ^= 0xff;
        assert!(matches!(
            Ed25519SecretKey::from_keypair_bytes(&bytes),
            Err(CryptoError::InvalidSecretKey(_))
        ));
        assert!(Ed25519SecretKey::from_keypair_bytes(&bytes[..32]).is_err());
    }

    #[test]
    fn test_identifiers_are_deterministic() {
        let keypair = random_keypair();
        assert_eq!(keypair.node_id(), keypair.public_key.node_id());
        assert_eq!(keypair.address().as_bytes(), keypair.node_id().as_bytes());

        let other = random_keypair();
        assert_ne!(keypair.node_id(), other.node_id());
    }

    #[test]
    fn test_public_key_serialization() {
        let keypair = random_keypair();
        let json = serde_json::to_string(&keypair.public_key).unwrap();
        let restored: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(keypair.public_key, restored);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let keypair = random_keypair();
        let debug = format!("{:?}", keypair.secret_key);
        assert!(debug.contains("[REDACTED]"));
    }
}
