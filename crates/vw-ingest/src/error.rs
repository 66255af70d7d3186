//! Error types for archive and row reading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening archives or decoding their entries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    #[error("archive not found: {}", path.display())]
    ArchiveNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to open entry {entry}: {source}")]
    Entry {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to read entry {entry}: {source}")]
    EntryRead {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {entry}: {source}")]
    Csv {
        entry: String,
        #[source]
        source: csv::Error,
    },

    #[error("entry {entry} has no modification time to use as its export date")]
    MissingModifiedTime { entry: String },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
