//! Florida Division of Elections extracts.
//!
//! Both extracts are headerless, tab-delimited text with no quoting, one
//! file per county. Every row is stamped with the extract's export date.

use vw_model::{
    CodeTables, HeaderSource, ImportType, RecordLayout, SourceFormat, StateCode,
};

use crate::embedded;
use crate::error::Result;
use crate::loaders::{load_code_table_from_str, load_fields_from_str};
use crate::states::LayoutTable;

pub const FORMAT: SourceFormat = SourceFormat::Delimited {
    delimiter: b'\t',
    quoting: false,
    headers: HeaderSource::Supplied,
};

pub const LAYOUTS: LayoutTable = &[
    (ImportType::Voters, voters),
    (ImportType::Histories, histories),
];

fn voters() -> Result<RecordLayout> {
    Ok(RecordLayout {
        state: StateCode::Florida,
        import_type: ImportType::Voters,
        fields: load_fields_from_str("florida/voters.csv", embedded::FLORIDA_VOTERS)?,
        format: FORMAT,
        export_date: true,
    })
}

fn histories() -> Result<RecordLayout> {
    Ok(RecordLayout {
        state: StateCode::Florida,
        import_type: ImportType::Histories,
        fields: load_fields_from_str("florida/histories.csv", embedded::FLORIDA_HISTORIES)?,
        format: FORMAT,
        export_date: true,
    })
}

pub fn code_tables() -> Result<CodeTables> {
    Ok(CodeTables {
        counties: Some(load_code_table_from_str(
            "Florida counties",
            embedded::FLORIDA_COUNTIES,
        )?),
        ..CodeTables::default()
    })
}
