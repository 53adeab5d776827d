//! Genesis document for a Keystone chain.
//!
//! The genesis document fixes the starting point of a chain: its identifier,
//! start time, initial validator set and the application state handed to the
//! application on `InitChain`. It is built once from fully specified inputs,
//! completed and validated by [`GenesisDoc::validate_and_complete`], and then
//! written with [`GenesisDoc::save_as`]. After that it is treated as
//! immutable input to the consensus engine.
//!
//! # Format
//!
//! JSON, with 64-bit integers encoded as decimal strings and keys in the
//! type-tagged envelope of [`PubKey`]:
//!
//! ```json
//! {
//!   "genesis_time": "2024-01-15T00:00:00.000000000Z",
//!   "chain_id": "testnet-1",
//!   "initial_height": "1",
//!   "consensus_params": { ... },
//!   "validators": [
//!     {
//!       "address": "B1C0...",
//!       "pub_key": { "type": "tendermint/PubKeyEd25519", "value": "..." },
//!       "power": "10",
//!       "name": "v1"
//!     }
//!   ],
//!   "app_hash": "",
//!   "app_state": { ... }
//! }
//! ```

use crate::address::Address;
use crate::fsutil;
use crate::pubkey::{PubKey, ED25519_KEY_TYPE_NAME};
use crate::serde_helpers::{hex_bytes, string_int};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Maximum length of a chain identifier in bytes.
pub const MAX_CHAIN_ID_LEN: usize = 50;

/// Upper bound for `block.max_bytes` (100 MiB).
pub const MAX_BLOCK_SIZE_BYTES: i64 = 104_857_600;

/// Upper bound for the summed validator voting power.
pub const MAX_TOTAL_VOTING_POWER: i64 = i64::MAX / 8;

/// Key types a validator may use.
pub const KNOWN_PUB_KEY_TYPES: &[&str] = &[ED25519_KEY_TYPE_NAME, "secp256k1", "sm2"];

/// Genesis validation and I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum GenesisError {
    /// `chain_id` is empty.
    #[error("genesis doc must include non-empty chain_id")]
    EmptyChainId,

    /// `chain_id` exceeds [`MAX_CHAIN_ID_LEN`].
    #[error("chain_id in genesis doc is too long (max: 50, got: {0})")]
    ChainIdTooLong(usize),

    /// `initial_height` is negative.
    #[error("initial_height cannot be negative (got {0})")]
    InvalidInitialHeight(i64),

    /// Consensus parameters failed validation.
    #[error("invalid consensus params: {0}")]
    InvalidConsensusParams(String),

    /// A validator has zero or negative voting power.
    #[error("validator {index} ({name:?}) has non-positive voting power {power}")]
    InvalidValidatorPower {
        /// Position in the validator list.
        index: usize,
        /// Display name of the validator.
        name: String,
        /// Offending power.
        power: i64,
    },

    /// The same public key appears twice in the validator set.
    #[error("validator {index} duplicates public key {pub_key}")]
    DuplicateValidator {
        /// Position of the second occurrence.
        index: usize,
        /// Base64 of the shared key.
        pub_key: String,
    },

    /// A validator's address does not match its public key.
    #[error("validator {index} has address {declared} but its public key hashes to {derived}")]
    ValidatorAddressMismatch {
        /// Position in the validator list.
        index: usize,
        /// Address declared in the document.
        declared: Address,
        /// Address derived from the public key.
        derived: Address,
    },

    /// Summed validator voting power exceeds [`MAX_TOTAL_VOTING_POWER`].
    #[error("total voting power of validators exceeds the maximum {max}")]
    TotalVotingPowerTooHigh {
        /// The allowed maximum.
        max: i64,
    },

    /// Application state is not a JSON payload.
    #[error("invalid app_state: {0}")]
    InvalidAppState(String),

    /// I/O error reading or writing the file.
    #[error("genesis file {path}: {source}")]
    Io {
        /// File involved.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Opaque application state.
///
/// Stored as raw JSON text so that the bytes handed in by the application
/// layer are written and read back exactly, without re-formatting.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppState(Box<RawValue>);

impl AppState {
    /// Wrap serialized application state.
    ///
    /// The payload must be JSON so it can be embedded in the document; its
    /// contents are not interpreted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GenesisError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| GenesisError::InvalidAppState(e.to_string()))?;
        RawValue::from_string(text.to_string())
            .map(Self)
            .map_err(|e| GenesisError::InvalidAppState(e.to_string()))
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.get().as_bytes()
    }
}

impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        self.0.get() == other.0.get()
    }
}

impl Eq for AppState {}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppState({} bytes)", self.0.get().len())
    }
}

/// Consensus engine parameters fixed at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Block size limits.
    pub block: BlockParams,
    /// Evidence handling limits.
    pub evidence: EvidenceParams,
    /// Validator key configuration.
    pub validator: ValidatorParams,
    /// Protocol version info.
    #[serde(default)]
    pub version: VersionParams,
}

/// Block production limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockParams {
    /// Maximum block size in bytes.
    #[serde(with = "string_int")]
    pub max_bytes: i64,
    /// Maximum gas per block, `-1` for unlimited.
    #[serde(with = "string_int")]
    pub max_gas: i64,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            max_bytes: 22_020_096, // 21 MiB
            max_gas: -1,
        }
    }
}

/// Evidence handling limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceParams {
    /// Maximum age of evidence in blocks.
    #[serde(with = "string_int")]
    pub max_age_num_blocks: i64,
    /// Maximum age of evidence in nanoseconds.
    #[serde(with = "string_int")]
    pub max_age_duration: i64,
    /// Maximum total evidence size per block in bytes.
    #[serde(default = "default_evidence_max_bytes", with = "string_int")]
    pub max_bytes: i64,
}

fn default_evidence_max_bytes() -> i64 {
    1_048_576 // 1 MiB
}

impl Default for EvidenceParams {
    fn default() -> Self {
        Self {
            max_age_num_blocks: 100_000,
            max_age_duration: 172_800_000_000_000, // 48h
            max_bytes: default_evidence_max_bytes(),
        }
    }
}

/// Validator key configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorParams {
    /// Accepted public key types.
    pub pub_key_types: Vec<String>,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self {
            pub_key_types: vec![ED25519_KEY_TYPE_NAME.to_string()],
        }
    }
}

/// Protocol version info.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionParams {
    /// Application protocol version.
    #[serde(default, with = "string_int")]
    pub app_version: u64,
}

impl ConsensusParams {
    /// Check the parameters for internal consistency.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let invalid = |msg: String| Err(GenesisError::InvalidConsensusParams(msg));

        if self.block.max_bytes <= 0 {
            return invalid(format!(
                "block.max_bytes must be greater than 0, got {}",
                self.block.max_bytes
            ));
        }
        if self.block.max_bytes > MAX_BLOCK_SIZE_BYTES {
            return invalid(format!(
                "block.max_bytes is too big: {} > {}",
                self.block.max_bytes, MAX_BLOCK_SIZE_BYTES
            ));
        }
        if self.block.max_gas < -1 {
            return invalid(format!(
                "block.max_gas must be greater or equal to -1, got {}",
                self.block.max_gas
            ));
        }
        if self.evidence.max_age_num_blocks <= 0 {
            return invalid(format!(
                "evidence.max_age_num_blocks must be greater than 0, got {}",
                self.evidence.max_age_num_blocks
            ));
        }
        if self.evidence.max_age_duration <= 0 {
            return invalid(format!(
                "evidence.max_age_duration must be greater than 0, got {}",
                self.evidence.max_age_duration
            ));
        }
        if self.evidence.max_bytes < 0 || self.evidence.max_bytes > self.block.max_bytes {
            return invalid(format!(
                "evidence.max_bytes must be within [0, block.max_bytes], got {}",
                self.evidence.max_bytes
            ));
        }
        if self.validator.pub_key_types.is_empty() {
            return invalid("validator.pub_key_types must not be empty".into());
        }
        for key_type in &self.validator.pub_key_types {
            if !KNOWN_PUB_KEY_TYPES.contains(&key_type.as_str()) {
                return invalid(format!("unknown validator.pub_key_types entry {key_type:?}"));
            }
        }
        Ok(())
    }
}

/// A validator in the genesis set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisValidator {
    /// Address derived from `pub_key`; filled in during completion when empty.
    #[serde(
        default,
        deserialize_with = "empty_address_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Address>,

    /// Consensus public key.
    pub pub_key: PubKey,

    /// Voting power, must be positive.
    #[serde(with = "string_int")]
    pub power: i64,

    /// Human-readable name / moniker.
    #[serde(default)]
    pub name: String,
}

impl GenesisValidator {
    /// Create a validator entry; the address is completed later.
    pub fn new(pub_key: PubKey, power: i64, name: impl Into<String>) -> Self {
        Self {
            address: None,
            pub_key,
            power,
            name: name.into(),
        }
    }
}

fn empty_address_as_none<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Treat `null`, a missing field and the zero time (year 1) as unset.
fn zero_time_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let time: Option<DateTime<Utc>> = Option::deserialize(deserializer)?;
    Ok(time.filter(|t| !is_zero_time(t)))
}

/// Unix seconds of `0001-01-01T00:00:00Z`.
const ZERO_TIME_UNIX_SECS: i64 = -62_135_596_800;

/// Whether `time` is the zero timestamp `0001-01-01T00:00:00Z`.
pub fn is_zero_time(time: &DateTime<Utc>) -> bool {
    time.timestamp() == ZERO_TIME_UNIX_SECS && time.timestamp_subsec_nanos() == 0
}

/// The canonical chain-start record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisDoc {
    /// Chain start time; `None` until completed.
    #[serde(default, deserialize_with = "zero_time_as_none")]
    pub genesis_time: Option<DateTime<Utc>>,

    /// Unique chain identifier.
    pub chain_id: String,

    /// First block height; 0 is completed to 1.
    #[serde(default, with = "string_int")]
    pub initial_height: i64,

    /// Consensus parameters; defaults are filled in during completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus_params: Option<ConsensusParams>,

    /// Initial validator set, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<GenesisValidator>,

    /// Initial application hash.
    #[serde(default, with = "hex_bytes")]
    pub app_hash: Vec<u8>,

    /// Opaque application state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_state: Option<AppState>,
}

impl GenesisDoc {
    /// Assemble a document from its caller-supplied parts.
    ///
    /// Nothing is checked here; call [`validate_and_complete`](Self::validate_and_complete)
    /// before persisting.
    pub fn new(
        chain_id: impl Into<String>,
        validators: Vec<GenesisValidator>,
        app_state: Option<AppState>,
        genesis_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            genesis_time,
            chain_id: chain_id.into(),
            initial_height: 0,
            consensus_params: None,
            validators,
            app_hash: Vec::new(),
            app_state,
        }
    }

    /// Validate the document and fill in defaulted fields.
    ///
    /// Checks run in order: chain id, initial height, consensus params, then
    /// each validator (power, uniqueness, address), then total voting power.
    /// `app_state` is never inspected. Nothing is completed unless every
    /// check passes, so on error the document is unchanged. On success a
    /// zero `initial_height` becomes 1, missing consensus params and
    /// validator addresses are filled in, and an unset `genesis_time`
    /// becomes the current time.
    pub fn validate_and_complete(&mut self) -> Result<(), GenesisError> {
        self.validate()?;

        if self.initial_height == 0 {
            self.initial_height = 1;
        }
        if self.consensus_params.is_none() {
            self.consensus_params = Some(ConsensusParams::default());
        }
        for validator in &mut self.validators {
            if validator.address.is_none() {
                validator.address = Some(validator.pub_key.address());
            }
        }
        if self.genesis_time.is_none() {
            self.genesis_time = Some(Utc::now());
        }

        debug!(
            chain_id = %self.chain_id,
            validators = self.validators.len(),
            "Genesis document validated"
        );
        Ok(())
    }

    fn validate(&self) -> Result<(), GenesisError> {
        if self.chain_id.is_empty() {
            return Err(GenesisError::EmptyChainId);
        }
        if self.chain_id.len() > MAX_CHAIN_ID_LEN {
            return Err(GenesisError::ChainIdTooLong(self.chain_id.len()));
        }

        if self.initial_height < 0 {
            return Err(GenesisError::InvalidInitialHeight(self.initial_height));
        }

        if let Some(params) = &self.consensus_params {
            params.validate()?;
        }

        let mut seen = HashSet::with_capacity(self.validators.len());
        let mut total: i64 = 0;
        for (index, validator) in self.validators.iter().enumerate() {
            if validator.power <= 0 {
                return Err(GenesisError::InvalidValidatorPower {
                    index,
                    name: validator.name.clone(),
                    power: validator.power,
                });
            }
            if !seen.insert(validator.pub_key) {
                return Err(GenesisError::DuplicateValidator {
                    index,
                    pub_key: validator.pub_key.to_base64(),
                });
            }

            let derived = validator.pub_key.address();
            if let Some(declared) = validator.address {
                if declared != derived {
                    return Err(GenesisError::ValidatorAddressMismatch {
                        index,
                        declared,
                        derived,
                    });
                }
            }

            total = total
                .checked_add(validator.power)
                .filter(|total| *total <= MAX_TOTAL_VOTING_POWER)
                .ok_or(GenesisError::TotalVotingPowerTooHigh {
                    max: MAX_TOTAL_VOTING_POWER,
                })?;
        }

        Ok(())
    }

    /// Sum of validator voting power, saturating at `i64::MAX`.
    pub fn total_voting_power(&self) -> i64 {
        self.validators
            .iter()
            .fold(0i64, |total, v| total.saturating_add(v.power))
    }

    /// Parse genesis from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        serde_json::from_str(json).map_err(|e| GenesisError::Parse(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, GenesisError> {
        serde_json::to_string_pretty(self).map_err(|e| GenesisError::Serialize(e.to_string()))
    }

    /// Load genesis from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GenesisError> {
        let content = std::fs::read_to_string(path).map_err(|source| GenesisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Write the document to `path`, replacing any existing file atomically.
    ///
    /// The containing directory is created if missing.
    pub fn save_as(&self, path: &Path) -> Result<(), GenesisError> {
        let io_err = |source| GenesisError::Io {
            path: path.display().to_string(),
            source,
        };

        let json = self.to_json()?;
        std::fs::create_dir_all(fsutil::parent_dir(path)).map_err(io_err)?;
        fsutil::write_atomic(path, json.as_bytes(), fsutil::PUBLIC_FILE_MODE).map_err(io_err)?;

        info!(path = %path.display(), chain_id = %self.chain_id, "Wrote genesis file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn pk(byte: u8) -> PubKey {
        PubKey::Ed25519([byte; 32])
    }

    fn sample_genesis() -> GenesisDoc {
        GenesisDoc::new(
            "keystone-test-1",
            vec![GenesisValidator::new(pk(1), 100, "validator-0")],
            Some(AppState::from_bytes(br#"{"accounts":[]}"#).unwrap()),
            None,
        )
    }

    #[test]
    fn test_validate_and_complete_fills_defaults() {
        let mut genesis = sample_genesis();
        let started = Utc::now();
        genesis.validate_and_complete().unwrap();

        assert_eq!(genesis.initial_height, 1);
        assert_eq!(genesis.consensus_params, Some(ConsensusParams::default()));
        assert_eq!(genesis.validators[0].address, Some(pk(1).address()));
        assert!(genesis.genesis_time.unwrap() >= started);
    }

    #[test]
    fn test_explicit_time_preserved() {
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let mut genesis = sample_genesis();
        genesis.genesis_time = Some(time);
        genesis.validate_and_complete().unwrap();
        assert_eq!(genesis.genesis_time, Some(time));
    }

    #[test]
    fn test_empty_chain_id() {
        let mut genesis = sample_genesis();
        genesis.chain_id = String::new();
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::EmptyChainId)
        ));
    }

    #[test]
    fn test_chain_id_too_long() {
        let mut genesis = sample_genesis();
        genesis.chain_id = "x".repeat(MAX_CHAIN_ID_LEN + 1);
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::ChainIdTooLong(51))
        ));
    }

    #[test]
    fn test_chain_id_checked_before_validators() {
        let mut genesis = sample_genesis();
        genesis.chain_id = String::new();
        genesis.validators[0].power = 0;
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::EmptyChainId)
        ));
    }

    #[test]
    fn test_zero_power_rejected() {
        let mut genesis = sample_genesis();
        genesis.validators[0].power = 0;
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::InvalidValidatorPower { index: 0, power: 0, .. })
        ));
    }

    #[test]
    fn test_negative_power_rejected() {
        let mut genesis = sample_genesis();
        genesis.validators.push(GenesisValidator::new(pk(2), -5, "v2"));
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::InvalidValidatorPower { index: 1, power: -5, .. })
        ));
    }

    #[test]
    fn test_duplicate_pubkey_rejected() {
        let mut genesis = sample_genesis();
        genesis.validators.push(GenesisValidator::new(pk(1), 5, "copy"));
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::DuplicateValidator { index: 1, .. })
        ));
    }

    #[test]
    fn test_address_mismatch_rejected() {
        let mut genesis = sample_genesis();
        genesis.validators[0].address = Some(pk(9).address());
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::ValidatorAddressMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_consensus_params() {
        let mut genesis = sample_genesis();
        let mut params = ConsensusParams::default();
        params.block.max_bytes = 0;
        genesis.consensus_params = Some(params);
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::InvalidConsensusParams(_))
        ));

        let mut params = ConsensusParams::default();
        params.validator.pub_key_types = vec!["rsa".into()];
        genesis.consensus_params = Some(params);
        assert!(genesis.validate_and_complete().is_err());
    }

    #[test]
    fn test_app_state_not_inspected() {
        let mut genesis = sample_genesis();
        genesis.app_state = Some(AppState::from_bytes(b"[1, \"anything\", null]").unwrap());
        assert!(genesis.validate_and_complete().is_ok());
    }

    #[test]
    fn test_app_state_must_be_json() {
        assert!(matches!(
            AppState::from_bytes(b"not json"),
            Err(GenesisError::InvalidAppState(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_preserves_everything() {
        let mut genesis = sample_genesis();
        genesis.validate_and_complete().unwrap();

        let json = genesis.to_json().unwrap();
        assert!(json.contains("\"power\": \"100\""));
        assert!(json.contains("\"initial_height\": \"1\""));

        let parsed = GenesisDoc::from_json(&json).unwrap();
        assert_eq!(parsed, genesis);
        assert_eq!(
            parsed.app_state.unwrap().as_bytes(),
            br#"{"accounts":[]}"#
        );
    }

    #[test]
    fn test_zero_time_is_unset() {
        let json = r#"{
            "genesis_time": "0001-01-01T00:00:00Z",
            "chain_id": "c",
            "validators": [{
                "address": "",
                "pub_key": {"type": "tendermint/PubKeyEd25519", "value": "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE="},
                "power": "10",
                "name": ""
            }]
        }"#;
        let mut genesis = GenesisDoc::from_json(json).unwrap();
        assert!(genesis.genesis_time.is_none());
        assert!(genesis.validators[0].address.is_none());

        genesis.validate_and_complete().unwrap();
        let now = Utc::now();
        assert!(now - genesis.genesis_time.unwrap() < Duration::seconds(5));
    }

    #[test]
    fn test_is_zero_time() {
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert!(is_zero_time(&zero));
        assert!(!is_zero_time(&Utc::now()));
    }

    #[test]
    fn test_total_voting_power() {
        let mut genesis = sample_genesis();
        genesis.validators.push(GenesisValidator::new(pk(2), 50, "v2"));
        assert_eq!(genesis.total_voting_power(), 150);
    }

    #[test]
    fn test_total_voting_power_overflow_rejected() {
        let mut genesis = sample_genesis();
        genesis.validators[0].power = i64::MAX;
        genesis.validators.push(GenesisValidator::new(pk(2), 1, "v2"));

        assert_eq!(genesis.total_voting_power(), i64::MAX);
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::TotalVotingPowerTooHigh { max: MAX_TOTAL_VOTING_POWER })
        ));
    }

    #[test]
    fn test_total_voting_power_limit() {
        let mut genesis = sample_genesis();
        genesis.validators[0].power = MAX_TOTAL_VOTING_POWER;
        genesis.validate_and_complete().unwrap();

        genesis.validators.push(GenesisValidator::new(pk(2), 1, "v2"));
        assert!(matches!(
            genesis.validate_and_complete(),
            Err(GenesisError::TotalVotingPowerTooHigh { .. })
        ));
    }

    #[test]
    fn test_failed_validation_leaves_document_unchanged() {
        let mut genesis = sample_genesis();
        genesis.validators.push(GenesisValidator::new(pk(2), 0, "v2"));

        assert!(genesis.validate_and_complete().is_err());
        assert_eq!(genesis.initial_height, 0);
        assert!(genesis.consensus_params.is_none());
        assert!(genesis.genesis_time.is_none());
        assert!(genesis.validators[0].address.is_none());
    }
}
