//! Value normalization for mapped voter records.

pub mod codes;
pub mod date;
pub mod error;
pub mod pipeline;

pub use error::{NormalizationError, Result};
pub use pipeline::{NormalizationPipeline, NormalizationRule, SUPPRESSED};
