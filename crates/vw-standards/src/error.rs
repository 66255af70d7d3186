//! Error types for loading embedded state data.

use thiserror::Error;
use vw_model::ModelError;

/// Errors that can occur while loading layouts and code tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to parse an embedded CSV file.
    #[error("failed to parse {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in a CSV field.
    #[error("invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },

    /// A canonical field or code appears twice in one file.
    #[error("duplicate {kind} '{value}' in {file}")]
    Duplicate {
        kind: &'static str,
        value: String,
        file: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for standards loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
