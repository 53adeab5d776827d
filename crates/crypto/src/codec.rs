//! Conversion between crypto-layer keys and the wire-form `PubKey`

use crate::ed25519::Ed25519PublicKey;
use crate::error::CryptoError;
use keystone_types::PubKey;

impl From<Ed25519PublicKey> for PubKey {
    fn from(key: Ed25519PublicKey) -> Self {
        PubKey::Ed25519(key.to_bytes())
    }
}

impl TryFrom<&PubKey> for Ed25519PublicKey {
    type Error = CryptoError;

    fn try_from(key: &PubKey) -> Result<Self, Self::Error> {
        match key {
            PubKey::Ed25519(bytes) => Ed25519PublicKey::from_bytes(bytes),
        }
    }
}

/// Wire-form public key of a crypto-layer key
pub fn pubkey_to_wire(key: &Ed25519PublicKey) -> PubKey {
    PubKey::from(*key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_from_secret;

    #[test]
    fn test_codec_roundtrip_preserves_identifiers() {
        let keypair = derive_from_secret(b"codec");
        let wire = pubkey_to_wire(&keypair.public_key);
        assert_eq!(wire.address(), keypair.address());
        assert_eq!(wire.node_id(), keypair.node_id());

        let back = Ed25519PublicKey::try_from(&wire).unwrap();
        assert_eq!(back, keypair.public_key);
    }
}
