//! Error types for mapping operations.

use std::fmt;

/// Errors from building a field mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Canonical field declared more than once.
    DuplicateField(String),
    /// Canonical field with a blank name.
    EmptyFieldName { position: usize },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField(name) => write!(f, "Canonical field declared twice: {name}"),
            Self::EmptyFieldName { position } => {
                write!(f, "Canonical field at position {position} has no name")
            }
        }
    }
}

impl std::error::Error for MappingError {}
