//! File-backed validator signing identity
//!
//! Two artifacts make up a validator identity:
//! - `priv_validator_key.json`: address, public key and private key
//! - `priv_validator_state.json`: the last height/round/step signed
//!
//! The key file is immutable once created. The state file belongs to the
//! consensus engine after generation and is never reset here: a state file
//! found next to a missing key file is kept, and a fresh one is only ever
//! created where none exists.

use super::{commit_new, ensure_parent, read_existing, warn_if_secret_ignored, Provisioned};
use crate::error::{InitError, InitResult};
use keystone_crypto::{pubkey_to_wire, Ed25519KeyPair, Ed25519SecretKey, KeySource};
use keystone_types::fsutil;
use keystone_types::pubkey::ED25519_PRIVKEY_TYPE;
use keystone_types::serde_helpers::{hex_bytes, string_int};
use keystone_types::{Address, PubKey, TypedKeyJson};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(s) => base64::decode(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Highest consensus step signed by this validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSignState {
    #[serde(with = "string_int")]
    pub height: i64,
    pub round: i32,
    pub step: i8,
    #[serde(
        default,
        with = "base64_bytes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub signature: Vec<u8>,
    #[serde(default, with = "hex_bytes", skip_serializing_if = "Vec::is_empty")]
    pub signbytes: Vec<u8>,
}

impl LastSignState {
    /// Load the signing state; absence or bad content is corruption.
    pub fn load(path: &Path) -> InitResult<Self> {
        Self::load_if_exists(path)?
            .ok_or_else(|| InitError::corrupt(path, "signing state file is missing"))
    }

    /// Load the signing state if the file exists; bad content is corruption.
    pub fn load_if_exists(path: &Path) -> InitResult<Option<Self>> {
        read_existing(path)?
            .map(|content| serde_json::from_str(&content).map_err(|e| InitError::corrupt(path, e)))
            .transpose()
    }

    /// Atomically replace the signing state file.
    pub fn save(&self, path: &Path) -> InitResult<()> {
        ensure_parent(path)?;
        fsutil::write_atomic(path, &self.to_json(path)?, fsutil::PRIVATE_FILE_MODE)
            .map_err(|e| InitError::fs(path, e))
    }

    /// Create the signing state file; fails if one already exists.
    fn create(&self, path: &Path) -> InitResult<()> {
        commit_new(path, &self.to_json(path)?)
    }

    fn to_json(&self, path: &Path) -> InitResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| InitError::fs(path, e.into()))
    }
}

#[derive(Serialize, Deserialize)]
struct FilePvKeyJson {
    address: Address,
    pub_key: PubKey,
    priv_key: TypedKeyJson,
}

/// Validator signing key plus its last-sign state, backed by two files.
pub struct FilePv {
    keypair: Ed25519KeyPair,
    last_sign_state: LastSignState,
    key_path: PathBuf,
    state_path: PathBuf,
}

impl FilePv {
    /// Load the validator at `key_path`/`state_path`, or create both from
    /// `source` if the key file is absent.
    ///
    /// On generation an existing signing state file is kept as it is;
    /// otherwise the zero state is created, before the key file is
    /// committed. If the key exists the state file must exist too.
    pub fn load_or_generate(
        key_path: &Path,
        state_path: &Path,
        source: &KeySource,
    ) -> InitResult<(Self, Provisioned)> {
        if read_existing(key_path)?.is_some() {
            let pv = Self::load(key_path, state_path)?;
            warn_if_secret_ignored(source, key_path);
            info!(
                key_path = %key_path.display(),
                address = %pv.address(),
                height = pv.last_sign_state.height,
                "Loaded validator key"
            );
            return Ok((pv, Provisioned::Loaded));
        }

        let keypair = source.keypair()?;
        let last_sign_state = match LastSignState::load_if_exists(state_path)? {
            Some(state) => {
                warn!(
                    state_path = %state_path.display(),
                    height = state.height,
                    "Validator key missing; keeping existing signing state"
                );
                state
            }
            None => {
                let state = LastSignState::default();
                state.create(state_path)?;
                state
            }
        };

        let pv = Self {
            keypair,
            last_sign_state,
            key_path: key_path.to_path_buf(),
            state_path: state_path.to_path_buf(),
        };
        commit_new(key_path, &pv.key_json()?)?;

        info!(
            key_path = %key_path.display(),
            state_path = %state_path.display(),
            address = %pv.address(),
            "Generated validator key"
        );
        Ok((pv, Provisioned::Generated))
    }

    /// Load both artifacts of an existing validator.
    pub fn load(key_path: &Path, state_path: &Path) -> InitResult<Self> {
        let keypair = Self::load_key(key_path)?;
        let last_sign_state = LastSignState::load(state_path)?;
        Ok(Self {
            keypair,
            last_sign_state,
            key_path: key_path.to_path_buf(),
            state_path: state_path.to_path_buf(),
        })
    }

    /// Read and check the key file alone.
    ///
    /// The stored address and public key must match the private key.
    pub fn load_key(key_path: &Path) -> InitResult<Ed25519KeyPair> {
        let content = read_existing(key_path)?.ok_or_else(|| {
            InitError::fs(
                key_path,
                io::Error::new(io::ErrorKind::NotFound, "validator key not found"),
            )
        })?;
        let doc: FilePvKeyJson =
            serde_json::from_str(&content).map_err(|e| InitError::corrupt(key_path, e))?;

        if doc.priv_key.kind != ED25519_PRIVKEY_TYPE {
            return Err(InitError::corrupt(
                key_path,
                format!("unsupported key type {}", doc.priv_key.kind),
            ));
        }
        let bytes = doc
            .priv_key
            .decode_value()
            .map_err(|e| InitError::corrupt(key_path, e))?;
        let secret = Ed25519SecretKey::from_keypair_bytes(&bytes)
            .map_err(|e| InitError::corrupt(key_path, e))?;
        let keypair = Ed25519KeyPair::from_secret_key(secret);

        if pubkey_to_wire(&keypair.public_key) != doc.pub_key {
            return Err(InitError::corrupt(
                key_path,
                "pub_key does not match private key",
            ));
        }
        if keypair.address() != doc.address {
            return Err(InitError::corrupt(
                key_path,
                format!(
                    "address {} does not match private key ({})",
                    doc.address,
                    keypair.address()
                ),
            ));
        }
        Ok(keypair)
    }

    fn key_json(&self) -> InitResult<Vec<u8>> {
        let doc = FilePvKeyJson {
            address: self.address(),
            pub_key: self.pub_key(),
            priv_key: TypedKeyJson::new(
                ED25519_PRIVKEY_TYPE,
                &self.keypair.secret_key.to_keypair_bytes(),
            ),
        };
        serde_json::to_vec_pretty(&doc).map_err(|e| InitError::fs(&self.key_path, e.into()))
    }

    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    pub fn pub_key(&self) -> PubKey {
        pubkey_to_wire(&self.keypair.public_key)
    }

    pub fn keypair(&self) -> &Ed25519KeyPair {
        &self.keypair
    }

    pub fn last_sign_state(&self) -> &LastSignState {
        &self.last_sign_state
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

impl std::fmt::Debug for FilePv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePv")
            .field("address", &self.address())
            .field("last_sign_state", &self.last_sign_state)
            .finish()
    }
}
