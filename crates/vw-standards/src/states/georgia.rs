//! Georgia Secretary of State voter history exports.
//!
//! Comma-separated with a header row. Counties, parties and election types
//! arrive as names and are stored as codes. Georgia voter rolls are not
//! imported.

use vw_model::{
    CodeTables, HeaderSource, ImportType, RecordLayout, SourceFormat, StateCode,
};

use crate::embedded;
use crate::error::Result;
use crate::loaders::{load_code_table_from_str, load_fields_from_str};
use crate::states::LayoutTable;

pub const FORMAT: SourceFormat = SourceFormat::Delimited {
    delimiter: b',',
    quoting: true,
    headers: HeaderSource::Embedded,
};

pub const LAYOUTS: LayoutTable = &[(ImportType::Histories, histories)];

fn histories() -> Result<RecordLayout> {
    Ok(RecordLayout {
        state: StateCode::Georgia,
        import_type: ImportType::Histories,
        fields: load_fields_from_str("georgia/histories.csv", embedded::GEORGIA_HISTORIES)?,
        format: FORMAT,
        export_date: false,
    })
}

pub fn code_tables() -> Result<CodeTables> {
    Ok(CodeTables {
        counties: Some(load_code_table_from_str(
            "Georgia counties",
            embedded::GEORGIA_COUNTIES,
        )?),
        parties: Some(load_code_table_from_str(
            "Georgia parties",
            embedded::GEORGIA_PARTIES,
        )?),
        election_types: Some(load_code_table_from_str(
            "Georgia election types",
            embedded::GEORGIA_ELECTION_TYPES,
        )?),
    })
}
