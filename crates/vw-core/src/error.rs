//! Import run errors.

use thiserror::Error;

use vw_ingest::IngestError;
use vw_map::MappingError;
use vw_normalization::NormalizationError;
use vw_warehouse::WarehouseError;

/// Any failure that ends an import run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("{state} does not support import type '{import_type}' (supported: {supported})")]
    UnsupportedImportType {
        state: String,
        import_type: String,
        supported: String,
    },

    #[error("batch capacity for {import_type} must be greater than zero")]
    InvalidBatchCapacity { import_type: String },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("{entry} record {record}: {source}")]
    Normalization {
        entry: String,
        record: usize,
        #[source]
        source: NormalizationError,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
