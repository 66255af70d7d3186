//! Per-state import standards.
//!
//! This crate holds everything that differs between state exports:
//!
//! - **Record layouts**: canonical field order, raw column aliases and the
//!   value transforms applied to each field.
//! - **Code tables**: counties, parties and election types used to turn
//!   published names into stored codes.
//! - **Source formats**: delimiter, quoting and header handling per export.
//!
//! All data is embedded at compile time (see [`embedded`]).

pub mod embedded;
pub mod error;
pub mod loaders;
pub mod registry;
pub mod states;

pub use error::{Result, StandardsError};
pub use registry::{StateProfile, supported_import_types};
