//! Per-state layout tables.
//!
//! Each state module exposes a static `LAYOUTS` table mapping an
//! [`ImportType`] to the function that builds its [`RecordLayout`], plus the
//! code tables its normalization rules need.

use vw_model::{ImportType, RecordLayout};

use crate::error::Result;

pub mod florida;
pub mod georgia;
pub mod north_carolina;

/// Builds one record layout from embedded data.
pub type LayoutLoader = fn() -> Result<RecordLayout>;

/// Static import-type dispatch table for a state.
pub type LayoutTable = &'static [(ImportType, LayoutLoader)];
