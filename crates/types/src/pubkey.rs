//! Public keys as they appear in genesis and key files.
//!
//! Keys use the type-tagged JSON envelope understood by the consensus
//! engine's own readers:
//!
//! ```json
//! { "type": "tendermint/PubKeyEd25519", "value": "<base64>" }
//! ```

use crate::address::{Address, NodeId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Type tag of an Ed25519 public key.
pub const ED25519_PUBKEY_TYPE: &str = "tendermint/PubKeyEd25519";

/// Type tag of an Ed25519 private key.
pub const ED25519_PRIVKEY_TYPE: &str = "tendermint/PrivKeyEd25519";

/// Short name of the Ed25519 key type in consensus params.
pub const ED25519_KEY_TYPE_NAME: &str = "ed25519";

/// Ed25519 public key length.
pub const ED25519_PUBKEY_SIZE: usize = 32;

/// Type-tagged key envelope, `{"type": ..., "value": <base64>}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedKeyJson {
    /// Type tag, e.g. [`ED25519_PUBKEY_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64 encoded key bytes.
    pub value: String,
}

impl TypedKeyJson {
    /// Wrap raw key bytes under a type tag.
    pub fn new(kind: &str, bytes: &[u8]) -> Self {
        Self {
            kind: kind.to_string(),
            value: base64::encode(bytes),
        }
    }

    /// Decode the base64 payload.
    pub fn decode_value(&self) -> Result<Vec<u8>, PubKeyError> {
        base64::decode(&self.value).map_err(|e| PubKeyError::Encoding(e.to_string()))
    }
}

impl fmt::Debug for TypedKeyJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Private keys travel in this envelope too.
        f.debug_struct("TypedKeyJson")
            .field("kind", &self.kind)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Error decoding a [`PubKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PubKeyError {
    /// Type tag not recognised.
    #[error("unsupported public key type: {0}")]
    UnsupportedType(String),
    /// Wrong payload length.
    #[error("invalid public key length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Length found.
        actual: usize,
    },
    /// Payload is not valid base64.
    #[error("invalid public key encoding: {0}")]
    Encoding(String),
}

/// A consensus-visible public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PubKey {
    /// Ed25519 public key bytes.
    Ed25519([u8; ED25519_PUBKEY_SIZE]),
}

impl PubKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PubKey::Ed25519(bytes) => bytes,
        }
    }

    /// Short key type name as used in consensus params.
    pub fn type_name(&self) -> &'static str {
        match self {
            PubKey::Ed25519(_) => ED25519_KEY_TYPE_NAME,
        }
    }

    /// Validator address of this key.
    pub fn address(&self) -> Address {
        Address::from_pubkey_bytes(self.as_bytes())
    }

    /// Transport node id of this key.
    pub fn node_id(&self) -> NodeId {
        NodeId::from_pubkey_bytes(self.as_bytes())
    }

    /// Base64 of the raw key bytes.
    pub fn to_base64(&self) -> String {
        base64::encode(self.as_bytes())
    }

    /// Parse an Ed25519 key from base64 of its raw bytes.
    pub fn ed25519_from_base64(s: &str) -> Result<Self, PubKeyError> {
        let bytes = base64::decode(s).map_err(|e| PubKeyError::Encoding(e.to_string()))?;
        Self::ed25519_from_slice(&bytes)
    }

    /// Build an Ed25519 key from a byte slice.
    pub fn ed25519_from_slice(bytes: &[u8]) -> Result<Self, PubKeyError> {
        let arr: [u8; ED25519_PUBKEY_SIZE] =
            bytes.try_into().map_err(|_| PubKeyError::InvalidLength {
                expected: ED25519_PUBKEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(PubKey::Ed25519(arr))
    }

    /// Convert into the tagged JSON envelope.
    pub fn to_typed_json(&self) -> TypedKeyJson {
        match self {
            PubKey::Ed25519(bytes) => TypedKeyJson::new(ED25519_PUBKEY_TYPE, bytes),
        }
    }

    /// Parse from the tagged JSON envelope.
    pub fn from_typed_json(json: &TypedKeyJson) -> Result<Self, PubKeyError> {
        match json.kind.as_str() {
            ED25519_PUBKEY_TYPE => Self::ed25519_from_slice(&json.decode_value()?),
            other => Err(PubKeyError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PubKey::Ed25519(bytes) => write!(f, "PubKeyEd25519({})", hex::encode(&bytes[..8])),
        }
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl Serialize for PubKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_typed_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PubKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = TypedKeyJson::deserialize(deserializer)?;
        Self::from_typed_json(&json).map_err(serde::de::Error::custom)
    }
}
