use thiserror::Error;

/// Errors raised while parsing model-level identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("unknown import type '{0}' (expected 'voters' or 'histories')")]
    UnknownImportType(String),

    #[error("unknown state '{0}'")]
    UnknownState(String),

    #[error("unknown field transform '{0}'")]
    UnknownTransform(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
