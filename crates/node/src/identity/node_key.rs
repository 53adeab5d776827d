//! Transport identity key (`node_key.json`)

use super::{commit_new, read_existing, warn_if_secret_ignored, Provisioned};
use crate::error::{InitError, InitResult};
use keystone_crypto::{pubkey_to_wire, Ed25519KeyPair, Ed25519SecretKey, KeySource};
use keystone_types::pubkey::ED25519_PRIVKEY_TYPE;
use keystone_types::{NodeId, PubKey, TypedKeyJson};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::info;

#[derive(Serialize, Deserialize)]
struct NodeKeyJson {
    priv_key: TypedKeyJson,
}

/// Ed25519 key identifying this node to its peers.
#[derive(Clone)]
pub struct NodeKey {
    keypair: Ed25519KeyPair,
}

impl NodeKey {
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        Self { keypair }
    }

    /// Stable peer identifier derived from the public key.
    pub fn id(&self) -> NodeId {
        self.keypair.node_id()
    }

    pub fn pub_key(&self) -> PubKey {
        pubkey_to_wire(&self.keypair.public_key)
    }

    pub fn keypair(&self) -> &Ed25519KeyPair {
        &self.keypair
    }

    /// Load an existing node key.
    pub fn load(path: &Path) -> InitResult<Self> {
        let content = read_existing(path)?.ok_or_else(|| {
            InitError::fs(
                path,
                io::Error::new(io::ErrorKind::NotFound, "node key not found"),
            )
        })?;
        Self::from_json(path, &content)
    }

    /// Load the node key at `path`, or create it from `source` if absent.
    pub fn load_or_generate(path: &Path, source: &KeySource) -> InitResult<(Self, Provisioned)> {
        if let Some(content) = read_existing(path)? {
            let key = Self::from_json(path, &content)?;
            warn_if_secret_ignored(source, path);
            info!(path = %path.display(), node_id = %key.id(), "Loaded node key");
            return Ok((key, Provisioned::Loaded));
        }

        let key = Self::new(source.keypair()?);
        commit_new(path, &key.to_json(path)?)?;
        info!(path = %path.display(), node_id = %key.id(), "Generated node key");
        Ok((key, Provisioned::Generated))
    }

    fn to_json(&self, path: &Path) -> InitResult<Vec<u8>> {
        let doc = NodeKeyJson {
            priv_key: TypedKeyJson::new(
                ED25519_PRIVKEY_TYPE,
                &self.keypair.secret_key.to_keypair_bytes(),
            ),
        };
        serde_json::to_vec_pretty(&doc).map_err(|e| InitError::fs(path, e.into()))
    }

    fn from_json(path: &Path, content: &str) -> InitResult<Self> {
        let doc: NodeKeyJson =
            serde_json::from_str(content).map_err(|e| InitError::corrupt(path, e))?;
        if doc.priv_key.kind != ED25519_PRIVKEY_TYPE {
            return Err(InitError::corrupt(
                path,
                format!("unsupported key type {}", doc.priv_key.kind),
            ));
        }
        let bytes = doc
            .priv_key
            .decode_value()
            .map_err(|e| InitError::corrupt(path, e))?;
        let secret = Ed25519SecretKey::from_keypair_bytes(&bytes)
            .map_err(|e| InitError::corrupt(path, e))?;
        Ok(Self::new(Ed25519KeyPair::from_secret_key(secret)))
    }
}

impl std::fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeKey").field("id", &self.id()).finish()
    }
}
