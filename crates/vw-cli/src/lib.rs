//! CLI library components for the voter warehouse importer.

pub mod cli;
pub mod commands;
pub mod logging;
