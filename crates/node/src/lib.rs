//! Keystone node daemon library
//!
//! Provisions the node's transport and validator identities and assembles
//! the genesis document. The `keystoned` binary is a thin CLI over this
//! crate.

pub mod config;
pub mod error;
pub mod genutil;
pub mod identity;
pub mod input;

pub use config::{
    default_home_dir, NodeConfig, DEFAULT_GENESIS_FILENAME, DEFAULT_HOME_DIR, DEFAULT_MONIKER,
    KEYSTONED_GENESIS_PATH_ENV, KEYSTONED_HOME_ENV,
};
pub use error::{InitError, InitResult};
pub use genutil::{
    export_genesis_file, export_genesis_file_with_time, initialize_node_validator_files,
    initialize_node_validator_files_from_mnemonic,
};
pub use identity::{FilePv, LastSignState, NodeKey, Provisioned};
