//! Integration tests for genesis export.

use chrono::{Duration, TimeZone, Utc};
use keystone_types::{AppState, GenesisDoc, GenesisError, GenesisValidator, PubKey};
use keystoned::{
    export_genesis_file, export_genesis_file_with_time, initialize_node_validator_files,
    NodeConfig,
};
use tempfile::TempDir;

fn validator(byte: u8, power: i64) -> GenesisValidator {
    GenesisValidator::new(PubKey::Ed25519([byte; 32]), power, format!("v{}", byte))
}

#[test]
fn test_export_testnet_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("genesis.json");
    let started = Utc::now();

    export_genesis_file_with_time(&path, "testnet-1", vec![validator(1, 10)], None, None)
        .unwrap();

    let loaded = GenesisDoc::load(&path).unwrap();
    assert_eq!(loaded.chain_id, "testnet-1");
    assert_eq!(loaded.validators.len(), 1);
    assert_eq!(loaded.validators[0].power, 10);

    let time = loaded.genesis_time.unwrap();
    assert!(time >= started - Duration::seconds(1));
    assert!(time <= Utc::now() + Duration::seconds(1));
}

#[test]
fn test_export_roundtrips_app_state_and_time() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config").join("genesis.json");
    let time = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap() + Duration::nanoseconds(123);
    let app_state = AppState::from_bytes(br#"{"bank":{"supply":[ ]},"z":1,"a":2}"#).unwrap();

    let written = export_genesis_file_with_time(
        &path,
        "keystone-1",
        vec![validator(1, 5), validator(2, 7)],
        Some(app_state.clone()),
        Some(time),
    )
    .unwrap();

    let loaded = GenesisDoc::load(&path).unwrap();
    assert_eq!(loaded, written);
    assert_eq!(loaded.genesis_time, Some(time));
    assert_eq!(loaded.app_state.unwrap().as_bytes(), app_state.as_bytes());
    assert_eq!(loaded.validators[1].address, Some(PubKey::Ed25519([2; 32]).address()));
}

#[test]
fn test_export_overwrites_previous_genesis() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("genesis.json");

    export_genesis_file_with_time(&path, "chain-a", vec![validator(1, 1)], None, None).unwrap();
    export_genesis_file_with_time(&path, "chain-b", vec![validator(1, 1)], None, None).unwrap();

    assert_eq!(GenesisDoc::load(&path).unwrap().chain_id, "chain-b");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_genesis_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("genesis.json");
    export_genesis_file_with_time(&path, "chain-a", vec![validator(1, 1)], None, None).unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = export_genesis_file_with_time(
        &path,
        "chain-a",
        vec![validator(1, 1), validator(1, 2)],
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, GenesisError::DuplicateValidator { index: 1, .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_zero_power_rejected() {
    let dir = TempDir::new().unwrap();
    let mut doc = GenesisDoc::new("chain", vec![validator(3, 0)], None, None);

    let err = export_genesis_file(&mut doc, &dir.path().join("genesis.json")).unwrap_err();
    assert!(matches!(err, GenesisError::InvalidValidatorPower { power: 0, .. }));
}

#[test]
fn test_overflowing_total_power_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("genesis.json");

    let err = export_genesis_file_with_time(
        &path,
        "chain",
        vec![validator(1, i64::MAX), validator(2, 1)],
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, GenesisError::TotalVotingPowerTooHigh { .. }));
    assert!(!path.exists());
}

#[test]
fn test_genesis_for_provisioned_validator() {
    let dir = TempDir::new().unwrap();
    let config = NodeConfig::new(dir.path());
    let (_, pub_key) = initialize_node_validator_files(&config).unwrap();

    let doc = export_genesis_file_with_time(
        &config.genesis_path(),
        "local-1",
        vec![GenesisValidator::new(pub_key, 100, "me")],
        None,
        None,
    )
    .unwrap();
    assert_eq!(doc.total_voting_power(), 100);
    assert_eq!(doc.validators[0].pub_key, pub_key);
}
