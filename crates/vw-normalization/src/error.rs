//! Error types for value normalization.

use thiserror::Error;

/// A field value that could not be normalized.
///
/// Every variant is fatal for the import run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizationError {
    #[error("field {field}: '{value}' is not a MM/DD/YYYY date")]
    InvalidDate { field: String, value: String },

    #[error("field {field}: no party matches '{value}'")]
    UnknownParty { field: String, value: String },

    #[error("field {field}: party '{value}' is ambiguous ({})", .candidates.join(", "))]
    AmbiguousParty {
        field: String,
        value: String,
        candidates: Vec<String>,
    },

    #[error("field {field}: unknown election type '{value}'")]
    UnknownElectionType { field: String, value: String },

    #[error("code table '{table}' has no UNKNOWN entry")]
    MissingUnknownCode { table: String },

    #[error("field {field}: transform '{transform}' needs the {table} code table")]
    MissingCodeTable {
        field: String,
        transform: &'static str,
        table: &'static str,
    },

    #[error("layout requires an export date but none was supplied")]
    MissingExportDate,

    #[error("mapped row has {actual} values, expected {expected}")]
    RowWidth { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
