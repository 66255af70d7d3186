//! Field mapping: raw export columns to canonical warehouse fields.

#![deny(unsafe_code)]

pub mod error;
pub mod mapper;

pub use error::MappingError;
pub use mapper::{ColumnResolution, FieldMapper, MappedRow};
