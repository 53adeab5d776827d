//! Node configuration
//!
//! The configuration fixes where identity and genesis artifacts live. Paths
//! are stored relative to the home directory and resolved against it, so a
//! home directory can be moved as a whole.

use anyhow::Context;
use keystone_types::fsutil;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable for genesis file path override.
///
/// When set, it takes precedence over the config file's `genesis_file`.
///
/// ```bash
/// KEYSTONED_GENESIS_PATH=/etc/keystoned/genesis.json keystoned validate
/// ```
pub const KEYSTONED_GENESIS_PATH_ENV: &str = "KEYSTONED_GENESIS_PATH";

/// Environment variable for home directory override.
///
/// When set, it takes precedence over the default home directory
/// (`~/.keystoned`).
pub const KEYSTONED_HOME_ENV: &str = "KEYSTONED_HOME";

/// Default home directory name (relative to user's home directory).
pub const DEFAULT_HOME_DIR: &str = ".keystoned";

/// Config subdirectory of the home directory.
pub const CONFIG_DIR: &str = "config";

/// Data subdirectory of the home directory.
pub const DATA_DIR: &str = "data";

/// Config file name, under `{home}/config/`.
pub const DEFAULT_CONFIG_FILENAME: &str = "node.json";

/// Default genesis filename, under `{home}/config/`.
pub const DEFAULT_GENESIS_FILENAME: &str = "genesis.json";

/// Default node key filename, under `{home}/config/`.
pub const DEFAULT_NODE_KEY_FILENAME: &str = "node_key.json";

/// Default validator key filename, under `{home}/config/`.
pub const DEFAULT_PRIV_VALIDATOR_KEY_FILENAME: &str = "priv_validator_key.json";

/// Default validator signing state filename, under `{home}/data/`.
pub const DEFAULT_PRIV_VALIDATOR_STATE_FILENAME: &str = "priv_validator_state.json";

/// Moniker used when none is configured.
pub const DEFAULT_MONIKER: &str = "keystone-node";

/// Returns the default home directory.
///
/// Resolution order:
/// 1. `KEYSTONED_HOME` environment variable (if set)
/// 2. `~/.keystoned`
pub fn default_home_dir() -> PathBuf {
    if let Ok(home) = std::env::var(KEYSTONED_HOME_ENV) {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}

/// Paths and identity settings of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Home directory containing `config/` and `data/`.
    ///
    /// Not persisted: the directory the config is loaded from wins.
    #[serde(skip)]
    pub home_dir: PathBuf,

    /// Human-readable node name, used as the validator name at genesis.
    pub moniker: String,

    /// Node key file, relative to home unless absolute.
    pub node_key_file: PathBuf,

    /// Validator key file, relative to home unless absolute.
    pub priv_validator_key_file: PathBuf,

    /// Validator signing state file, relative to home unless absolute.
    pub priv_validator_state_file: PathBuf,

    /// Genesis file, relative to home unless absolute.
    pub genesis_file: PathBuf,
}

impl NodeConfig {
    /// Default layout rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home.into(),
            moniker: DEFAULT_MONIKER.to_string(),
            node_key_file: Path::new(CONFIG_DIR).join(DEFAULT_NODE_KEY_FILENAME),
            priv_validator_key_file: Path::new(CONFIG_DIR)
                .join(DEFAULT_PRIV_VALIDATOR_KEY_FILENAME),
            priv_validator_state_file: Path::new(DATA_DIR)
                .join(DEFAULT_PRIV_VALIDATOR_STATE_FILENAME),
            genesis_file: Path::new(CONFIG_DIR).join(DEFAULT_GENESIS_FILENAME),
        }
    }

    pub fn with_moniker(mut self, moniker: impl Into<String>) -> Self {
        self.moniker = moniker.into();
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.home_dir.join(path)
        }
    }

    /// `{home}/config/node.json`
    pub fn config_path(&self) -> PathBuf {
        Self::config_path_in(&self.home_dir)
    }

    fn config_path_in(home: &Path) -> PathBuf {
        home.join(CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)
    }

    pub fn node_key_path(&self) -> PathBuf {
        self.resolve(&self.node_key_file)
    }

    pub fn priv_validator_key_path(&self) -> PathBuf {
        self.resolve(&self.priv_validator_key_file)
    }

    pub fn priv_validator_state_path(&self) -> PathBuf {
        self.resolve(&self.priv_validator_state_file)
    }

    /// Resolve the effective genesis file path.
    ///
    /// Resolution order (highest priority first):
    /// 1. `KEYSTONED_GENESIS_PATH` environment variable
    /// 2. `genesis_file` from the config, resolved against home
    pub fn genesis_path(&self) -> PathBuf {
        if let Ok(env_path) = std::env::var(KEYSTONED_GENESIS_PATH_ENV) {
            return PathBuf::from(env_path);
        }
        self.resolve(&self.genesis_file)
    }

    /// Save config to `{home}/config/node.json`
    pub fn save(&self) -> Result<(), anyhow::Error> {
        let path = self.config_path();
        let json = serde_json::to_string_pretty(self)?;
        fsutil::ensure_dir(fsutil::parent_dir(&path), fsutil::PRIVATE_DIR_MODE)
            .with_context(|| format!("Failed to create {}", fsutil::parent_dir(&path).display()))?;
        fsutil::write_atomic(&path, json.as_bytes(), fsutil::PUBLIC_FILE_MODE)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Load config from file, rooting it at `home`
    pub fn load(path: &Path, home: &Path) -> Result<Self, anyhow::Error> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.home_dir = home.to_path_buf();
        Ok(config)
    }

    /// Load `{home}/config/node.json` if present, else the default layout.
    pub fn load_or_default(home: &Path) -> Result<Self, anyhow::Error> {
        let path = Self::config_path_in(home);
        if path.exists() {
            Self::load(&path, home)
        } else {
            Ok(Self::new(home))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = NodeConfig::new("/srv/node");
        assert_eq!(
            config.node_key_path(),
            PathBuf::from("/srv/node/config/node_key.json")
        );
        assert_eq!(
            config.priv_validator_key_path(),
            PathBuf::from("/srv/node/config/priv_validator_key.json")
        );
        assert_eq!(
            config.priv_validator_state_path(),
            PathBuf::from("/srv/node/data/priv_validator_state.json")
        );
        assert_eq!(
            config.config_path(),
            PathBuf::from("/srv/node/config/node.json")
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let mut config = NodeConfig::new("/srv/node");
        config.node_key_file = PathBuf::from("/etc/keys/node_key.json");
        assert_eq!(
            config.node_key_path(),
            PathBuf::from("/etc/keys/node_key.json")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let config = NodeConfig::new(dir.path()).with_moniker("validator-1");
        config.save().unwrap();

        let loaded = NodeConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rehomes_config() {
        let original = TempDir::new().unwrap();
        let moved = TempDir::new().unwrap();
        NodeConfig::new(original.path()).save().unwrap();

        let loaded =
            NodeConfig::load(&NodeConfig::new(original.path()).config_path(), moved.path())
                .unwrap();
        assert_eq!(loaded.home_dir, moved.path());
        assert!(loaded.node_key_path().starts_with(moved.path()));
    }

    #[test]
    fn test_missing_config_gives_default() {
        let dir = TempDir::new().unwrap();
        let config = NodeConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, NodeConfig::new(dir.path()));
        assert!(!config.config_path().exists());
    }
}
