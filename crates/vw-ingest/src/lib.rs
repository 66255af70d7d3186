//! Archive and row readers for state voter exports.
//!
//! [`ZipSource`] lists the members of an export archive and hands out a
//! [`RowIter`] per member. Rows come back as [`vw_model::RawRow`] maps keyed
//! by the file's own header or, for headerless exports, by the canonical
//! field names.

pub mod archive;
pub mod delimited;
pub mod error;
pub mod positional;

pub use archive::{ArchiveEntry, RowIter, ZipSource};
pub use error::{IngestError, Result};
pub use positional::MIN_LINE_LEN;
