//! Import orchestration for the voter warehouse.
//!
//! [`Importer`] ties the pieces together: archive entries from
//! `vw-ingest`, column mapping from `vw-map`, value normalization from
//! `vw-normalization` and batched writes through a
//! [`vw_warehouse::Warehouse`].

pub mod batch;
pub mod error;
pub mod importer;
pub mod redaction;

pub use batch::{BatchLoader, FileSummary};
pub use error::{ImportError, Result};
pub use importer::{ImportPhase, ImportSummary, Importer, resolve_import_type};
pub use redaction::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data_enabled};
