//! Supported states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A U.S. state whose election agency exports we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateCode {
    Florida,
    Georgia,
    NorthCarolina,
}

impl StateCode {
    pub const ALL: [StateCode; 3] = [
        StateCode::Florida,
        StateCode::Georgia,
        StateCode::NorthCarolina,
    ];

    /// Top-level configuration section holding every state.
    pub fn country_designation(self) -> &'static str {
        "UnitedStates"
    }

    /// Configuration section name for this state.
    pub fn state_designation(self) -> &'static str {
        match self {
            StateCode::Florida => "Florida",
            StateCode::Georgia => "Georgia",
            StateCode::NorthCarolina => "NorthCarolina",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            StateCode::Florida => "Florida",
            StateCode::Georgia => "Georgia",
            StateCode::NorthCarolina => "North Carolina",
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state_designation())
    }
}

impl FromStr for StateCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "florida" | "fl" => Ok(StateCode::Florida),
            "georgia" | "ga" => Ok(StateCode::Georgia),
            "northcarolina" | "nc" => Ok(StateCode::NorthCarolina),
            _ => Err(ModelError::UnknownState(s.trim().to_string())),
        }
    }
}
