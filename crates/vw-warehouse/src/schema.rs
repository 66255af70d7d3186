//! Embedded DDL per state.

use vw_model::StateCode;

// ============================================================================
// Schema scripts
// ============================================================================

pub const FLORIDA_SCHEMA: &str = include_str!("../sql/florida.sql");
pub const GEORGIA_SCHEMA: &str = include_str!("../sql/georgia.sql");
pub const NORTH_CAROLINA_SCHEMA: &str = include_str!("../sql/north_carolina.sql");

/// DDL creating every table a state writes to. Safe to run repeatedly.
pub fn schema_for(state: StateCode) -> &'static str {
    match state {
        StateCode::Florida => FLORIDA_SCHEMA,
        StateCode::Georgia => GEORGIA_SCHEMA,
        StateCode::NorthCarolina => NORTH_CAROLINA_SCHEMA,
    }
}
