//! Record kinds a state export can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The record kind being imported: the voter roll or the vote history.
///
/// The key form (`voters` / `histories`) is what operators type on the
/// command line and what the configuration file uses for batch limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    Voters,
    Histories,
}

impl ImportType {
    pub const ALL: [ImportType; 2] = [ImportType::Voters, ImportType::Histories];

    /// Key used on the command line and in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            ImportType::Voters => "voters",
            ImportType::Histories => "histories",
        }
    }

    /// Warehouse table receiving rows of this kind.
    pub fn table_name(self) -> &'static str {
        match self {
            ImportType::Voters => "Voters",
            ImportType::Histories => "Histories",
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ImportType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "voters" => Ok(ImportType::Voters),
            "histories" => Ok(ImportType::Histories),
            other => Err(ModelError::UnknownImportType(other.to_string())),
        }
    }
}
