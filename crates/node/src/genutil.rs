//! Node bootstrap and genesis export
//!
//! Provisioning order: validate the mnemonic (if any), then the node key,
//! then the validator key and signing state. Genesis export runs
//! independently of provisioning.

use crate::config::NodeConfig;
use crate::error::InitResult;
use crate::identity::{FilePv, NodeKey};
use chrono::{DateTime, Utc};
use keystone_crypto::KeySource;
use keystone_types::{AppState, GenesisDoc, GenesisError, GenesisValidator, NodeId, PubKey};
use std::path::Path;
use tracing::info;

/// Provision node and validator identity with fresh random keys.
///
/// Existing identity files are loaded instead.
pub fn initialize_node_validator_files(config: &NodeConfig) -> InitResult<(NodeId, PubKey)> {
    initialize_node_validator_files_from_mnemonic(config, "")
}

/// Provision node and validator identity, deriving new keys from `mnemonic`.
///
/// An empty mnemonic means random keys. A non-empty mnemonic is validated
/// before any file is touched. Identity files that already exist are loaded
/// and the mnemonic is ignored for them.
pub fn initialize_node_validator_files_from_mnemonic(
    config: &NodeConfig,
    mnemonic: &str,
) -> InitResult<(NodeId, PubKey)> {
    let source = KeySource::from_mnemonic_phrase(mnemonic)?;

    let (node_key, node_status) = NodeKey::load_or_generate(&config.node_key_path(), &source)?;
    let (pv, pv_status) = FilePv::load_or_generate(
        &config.priv_validator_key_path(),
        &config.priv_validator_state_path(),
        &source,
    )?;

    info!(
        home = %config.home_dir.display(),
        node_id = %node_key.id(),
        validator = %pv.address(),
        node_key = %node_status,
        validator_key = %pv_status,
        recovered = source.is_deterministic(),
        "Node identity ready"
    );
    Ok((node_key.id(), pv.pub_key()))
}

/// Validate and complete `doc`, then write it to `path`.
pub fn export_genesis_file(doc: &mut GenesisDoc, path: &Path) -> Result<(), GenesisError> {
    doc.validate_and_complete()?;
    doc.save_as(path)
}

/// Build a genesis document from its parts and export it to `path`.
///
/// `genesis_time` of `None` is completed with the current time. Returns the
/// document as written.
pub fn export_genesis_file_with_time(
    path: &Path,
    chain_id: &str,
    validators: Vec<GenesisValidator>,
    app_state: Option<AppState>,
    genesis_time: Option<DateTime<Utc>>,
) -> Result<GenesisDoc, GenesisError> {
    let mut doc = GenesisDoc::new(chain_id, validators, app_state, genesis_time);
    export_genesis_file(&mut doc, path)?;
    Ok(doc)
}
