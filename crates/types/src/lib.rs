//! Core types for Keystone node bootstrap.
//!
//! This crate provides the data structures shared by the key tooling and the
//! node daemon: the genesis document, public-key wire forms, identifiers
//! derived from keys, and the auth parameter registry.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod address;
pub mod fsutil;
pub mod genesis;
pub mod params;
pub mod pubkey;
pub mod serde_helpers;

pub use address::{Address, IdParseError, NodeId, ADDRESS_SIZE};
pub use genesis::{
    AppState, BlockParams, ConsensusParams, EvidenceParams, GenesisDoc, GenesisError,
    GenesisValidator, ValidatorParams, VersionParams, MAX_CHAIN_ID_LEN, MAX_TOTAL_VOTING_POWER,
};
pub use params::{AuthParams, ParamError, ParamSetPair};
pub use pubkey::{PubKey, PubKeyError, TypedKeyJson};
