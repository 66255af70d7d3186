//! North Carolina State Board of Elections exports.
//!
//! Tab-delimited with a header row; values may be quoted. Only dates are
//! reformatted, every other column is stored as published.

use vw_model::{
    CodeTables, HeaderSource, ImportType, RecordLayout, SourceFormat, StateCode,
};

use crate::embedded;
use crate::error::Result;
use crate::loaders::{load_code_table_from_str, load_fields_from_str};
use crate::states::LayoutTable;

pub const FORMAT: SourceFormat = SourceFormat::Delimited {
    delimiter: b'\t',
    quoting: true,
    headers: HeaderSource::Embedded,
};

pub const LAYOUTS: LayoutTable = &[
    (ImportType::Voters, voters),
    (ImportType::Histories, histories),
];

fn voters() -> Result<RecordLayout> {
    Ok(RecordLayout {
        state: StateCode::NorthCarolina,
        import_type: ImportType::Voters,
        fields: load_fields_from_str(
            "north_carolina/voters.csv",
            embedded::NORTH_CAROLINA_VOTERS,
        )?,
        format: FORMAT,
        export_date: false,
    })
}

fn histories() -> Result<RecordLayout> {
    Ok(RecordLayout {
        state: StateCode::NorthCarolina,
        import_type: ImportType::Histories,
        fields: load_fields_from_str(
            "north_carolina/histories.csv",
            embedded::NORTH_CAROLINA_HISTORIES,
        )?,
        format: FORMAT,
        export_date: false,
    })
}

pub fn code_tables() -> Result<CodeTables> {
    Ok(CodeTables {
        counties: Some(load_code_table_from_str(
            "North Carolina counties",
            embedded::NORTH_CAROLINA_COUNTIES,
        )?),
        ..CodeTables::default()
    })
}
