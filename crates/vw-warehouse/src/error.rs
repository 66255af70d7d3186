//! Storage and configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a warehouse backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WarehouseError {
    #[error("failed to prepare database directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database {operation} failed: {source}")]
    Sqlite {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table {table} does not exist")]
    MissingTable { table: String },

    #[error("table {table} is missing columns: {}", missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    #[error("row for {table} has {actual} values, statement expects {expected}")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },
}

impl WarehouseError {
    pub(crate) fn sqlite(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Sqlite { operation, source }
    }
}

/// Errors raised while loading the YAML configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("no configuration for {country}.{state}")]
    MissingState { country: String, state: String },

    #[error("batch limit for {state} {import_type} must be greater than zero")]
    InvalidBatchLimit { state: String, import_type: String },
}

/// Result type for warehouse operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;
