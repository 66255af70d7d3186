//! Voter warehouse storage.
//!
//! The [`Warehouse`] trait is what the importer writes through.
//! [`SqliteWarehouse`] implements it on a single SQLite database per state,
//! configured from the YAML file described in [`config`].

pub mod config;
pub mod error;
pub mod schema;
pub mod sqlite;
pub mod statement;
pub mod warehouse;

pub use config::{DEFAULT_CONFIG_PATH, DatabaseConfig, StateConfig, WarehouseConfig};
pub use error::{ConfigError, Result, WarehouseError};
pub use sqlite::SqliteWarehouse;
pub use statement::{WriteMode, WriteStatement};
pub use warehouse::Warehouse;
