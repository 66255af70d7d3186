pub mod code_table;
pub mod error;
pub mod import_type;
pub mod layout;
pub mod profile;
pub mod row;
pub mod state;

pub use code_table::{CodeEntry, CodeTable, CodeTables};
pub use error::{ModelError, Result};
pub use import_type::ImportType;
pub use layout::{
    EXPORT_DATE_FIELD, FieldSpec, HeaderSource, RecordLayout, SourceFormat, Transform,
};
pub use profile::{DEFAULT_BATCH_CAPACITY, ImportProfile};
pub use row::{CanonicalRow, FieldValue, RawRow};
pub use state::StateCode;
