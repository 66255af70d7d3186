//! Embedded state data.
//!
//! Record layouts and code tables are compiled in with `include_str!()` so
//! an import never depends on files next to the binary.
//!
//! # Layout files
//!
//! `Order,Field,Aliases,Transforms`, where aliases and transforms are
//! semicolon-separated lists.
//!
//! # Code table files
//!
//! `Code,Name`, in lookup priority order.

// =============================================================================
// Florida
// =============================================================================

pub const FLORIDA_VOTERS: &str = include_str!("../data/florida/voters.csv");

pub const FLORIDA_HISTORIES: &str = include_str!("../data/florida/histories.csv");

pub const FLORIDA_COUNTIES: &str = include_str!("../data/florida/counties.csv");

// =============================================================================
// Georgia
// =============================================================================

pub const GEORGIA_HISTORIES: &str = include_str!("../data/georgia/histories.csv");

pub const GEORGIA_COUNTIES: &str = include_str!("../data/georgia/counties.csv");

pub const GEORGIA_PARTIES: &str = include_str!("../data/georgia/parties.csv");

pub const GEORGIA_ELECTION_TYPES: &str = include_str!("../data/georgia/election_types.csv");

// =============================================================================
// North Carolina
// =============================================================================

pub const NORTH_CAROLINA_VOTERS: &str = include_str!("../data/north_carolina/voters.csv");

pub const NORTH_CAROLINA_HISTORIES: &str = include_str!("../data/north_carolina/histories.csv");

pub const NORTH_CAROLINA_COUNTIES: &str = include_str!("../data/north_carolina/counties.csv");
