//! YAML configuration.
//!
//! ```yaml
//! UnitedStates:
//!   Florida:
//!     database:
//!       path: /var/lib/voterwarehouse/florida.db
//!     batch_limits:
//!       voters: 200000
//!       histories: 200000
//!     legacy_reader: false
//! ```
//!
//! Relative database paths are resolved against the directory holding the
//! configuration file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use vw_model::{DEFAULT_BATCH_CAPACITY, ImportType, StateCode};

use crate::error::ConfigError;

/// Location of the configuration file when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/VoterWarehouse/config.yml";

/// Root of the configuration file, keyed by country then state.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    #[serde(rename = "UnitedStates", default)]
    united_states: BTreeMap<String, StateConfig>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    pub database: DatabaseConfig,
    /// Rows per write transaction; omitted kinds use the default.
    #[serde(default)]
    pub batch_limits: BTreeMap<ImportType, usize>,
    /// Read headerless exports with the byte-split reader.
    #[serde(default)]
    pub legacy_reader: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl StateConfig {
    pub fn batch_limit(&self, import_type: ImportType) -> usize {
        self.batch_limits
            .get(&import_type)
            .copied()
            .unwrap_or(DEFAULT_BATCH_CAPACITY)
    }
}

impl WarehouseConfig {
    /// Read and parse the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }

    /// Section for `state`, validated.
    pub fn state(&self, state: StateCode) -> Result<StateConfig, ConfigError> {
        let mut section = self
            .united_states
            .get(state.state_designation())
            .cloned()
            .ok_or_else(|| ConfigError::MissingState {
                country: state.country_designation().to_string(),
                state: state.state_designation().to_string(),
            })?;

        if let Some((import_type, _)) = section.batch_limits.iter().find(|(_, limit)| **limit == 0)
        {
            return Err(ConfigError::InvalidBatchLimit {
                state: state.state_designation().to_string(),
                import_type: import_type.key().to_string(),
            });
        }

        if section.database.path.is_relative()
            && let Some(base) = &self.base_dir
        {
            section.database.path = base.join(&section.database.path);
        }
        Ok(section)
    }

    /// State sections present in the file, in name order.
    pub fn configured_states(&self) -> impl Iterator<Item = &str> {
        self.united_states.keys().map(String::as_str)
    }
}
