//! Code tables: short codes paired with display names.
//!
//! State exports carry human-readable names for counties, parties and
//! election types while the warehouse stores the short code. A
//! [`CodeTable`] keeps its entries in declaration order so that reverse
//! lookups are deterministic.
//!
//! ## Example: Georgia parties
//!
//! ```text
//! DE  Democrat
//! RE  Republican
//! NP  Non-Partisan
//! ```

use serde::{Deserialize, Serialize};

/// A single `(code, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub name: String,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// An immutable, ordered set of code entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    /// Table label used in error messages (e.g. "Georgia counties").
    pub label: String,
    entries: Vec<CodeEntry>,
}

impl CodeTable {
    pub fn new(label: impl Into<String>, entries: Vec<CodeEntry>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for a code (exact match).
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.name.as_str())
    }

    /// Code for a display name (exact, case-sensitive match).
    pub fn code_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.code.as_str())
    }

    /// First entry whose name, after `normalize`, equals `key`.
    pub fn find_normalized<F>(&self, key: &str, normalize: F) -> Option<&CodeEntry>
    where
        F: Fn(&str) -> String,
    {
        self.entries
            .iter()
            .find(|entry| normalize(&entry.name) == key)
    }

    /// Every entry whose name, after `normalize`, starts with `prefix`.
    pub fn find_by_prefix<F>(&self, prefix: &str, normalize: F) -> Vec<&CodeEntry>
    where
        F: Fn(&str) -> String,
    {
        self.entries
            .iter()
            .filter(|entry| normalize(&entry.name).starts_with(prefix))
            .collect()
    }
}

/// The code tables a state needs during normalization.
///
/// Tables a state does not publish are `None`; asking the normalizer to
/// resolve against a missing table is a configuration error.
#[derive(Debug, Clone, Default)]
pub struct CodeTables {
    pub counties: Option<CodeTable>,
    pub parties: Option<CodeTable>,
    pub election_types: Option<CodeTable>,
}
