//! Identifiers derived from public keys.
//!
//! Both identifiers are the first 20 bytes of `SHA-256(pubkey)`:
//! - [`Address`] names a validator inside the genesis document and the
//!   validator key file (upper-case hex on the wire).
//! - [`NodeId`] names a node on the transport layer (lower-case hex).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Size of an address / node id in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Truncated SHA-256 of raw public key bytes.
fn truncated_sha256(pubkey: &[u8]) -> [u8; ADDRESS_SIZE] {
    let hash = Sha256::digest(pubkey);
    let mut out = [0u8; ADDRESS_SIZE];
    out.copy_from_slice(&hash[..ADDRESS_SIZE]);
    out
}

fn decode_fixed(s: &str) -> Result<[u8; ADDRESS_SIZE], IdParseError> {
    let bytes = hex::decode(s).map_err(|e| IdParseError::Hex(e.to_string()))?;
    if bytes.len() != ADDRESS_SIZE {
        return Err(IdParseError::Length(bytes.len()));
    }
    let mut out = [0u8; ADDRESS_SIZE];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Error parsing an [`Address`] or [`NodeId`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// Not valid hex.
    #[error("invalid hex: {0}")]
    Hex(String),
    /// Wrong number of bytes.
    #[error("expected 20 bytes, got {0}")]
    Length(usize),
}

/// Validator address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    /// Derive the address of a raw public key.
    pub fn from_pubkey_bytes(pubkey: &[u8]) -> Self {
        Self(truncated_sha256(pubkey))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode_upper(self.0))
    }
}

impl FromStr for Address {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed(s.trim_start_matches("0x")).map(Self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Transport-layer node identifier (20 bytes, lower-case hex).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub [u8; ADDRESS_SIZE]);

impl NodeId {
    /// Derive the node id of a raw public key.
    pub fn from_pubkey_bytes(pubkey: &[u8]) -> Self {
        Self(truncated_sha256(pubkey))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", hex::encode(self.0))
    }
}

impl FromStr for NodeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed(s).map(Self)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_and_node_id_share_bytes() {
        let pubkey = [7u8; 32];
        let addr = Address::from_pubkey_bytes(&pubkey);
        let id = NodeId::from_pubkey_bytes(&pubkey);
        assert_eq!(addr.as_bytes(), id.as_bytes());
        assert_eq!(addr.to_string(), id.to_string().to_uppercase());
    }

    #[test]
    fn test_node_id_is_40_lowercase_hex_chars() {
        let id = NodeId::from_pubkey_bytes(&[1u8; 32]);
        let s = id.to_string();
        assert_eq!(s.len(), 40);
        assert_eq!(s, s.to_lowercase());
        assert_eq!(s.parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn test_address_parse_rejects_wrong_length() {
        assert_eq!(
            "abcd".parse::<Address>(),
            Err(IdParseError::Length(2))
        );
        assert!("zz".parse::<Address>().is_err());
    }

    #[test]
    fn test_address_json_roundtrip() {
        let addr = Address::from_pubkey_bytes(b"validator");
        let json = serde_json::to_string(&addr).unwrap();
        let restored: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, restored);
    }
}
