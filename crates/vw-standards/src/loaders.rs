//! Parsers for the embedded layout and code table CSV files.

use std::collections::BTreeSet;
use std::io::Cursor;

use serde::Deserialize;

use vw_model::{CodeEntry, CodeTable, FieldSpec, Transform};

use crate::error::{Result, StandardsError};

// =============================================================================
// CSV Row Types
// =============================================================================

/// Row from a layout file.
#[derive(Debug, Deserialize)]
struct LayoutCsvRow {
    #[serde(rename = "Order")]
    order: String,
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Aliases")]
    aliases: String,
    #[serde(rename = "Transforms")]
    transforms: String,
}

/// Row from a code table file.
#[derive(Debug, Deserialize)]
struct CodeCsvRow {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Name")]
    name: String,
}

// =============================================================================
// Loading Functions
// =============================================================================

/// Parse a layout file into canonical field specs, ordered by `Order`.
///
/// Field names must be unique within a file; the resulting order is the
/// warehouse column order.
pub fn load_fields_from_str(file: &str, content: &str) -> Result<Vec<FieldSpec>> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(cursor);

    let mut ordered: Vec<(u32, FieldSpec)> = Vec::new();
    let mut seen = BTreeSet::new();

    for result in reader.deserialize::<LayoutCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        let order = row
            .order
            .trim()
            .parse::<u32>()
            .map_err(|_| StandardsError::InvalidValue {
                field: "Order",
                value: row.order.clone(),
                file: file.to_string(),
            })?;

        let name = row.field.trim().to_string();
        if name.is_empty() {
            return Err(StandardsError::InvalidValue {
                field: "Field",
                value: row.field,
                file: file.to_string(),
            });
        }
        if !seen.insert(name.clone()) {
            return Err(StandardsError::Duplicate {
                kind: "field",
                value: name,
                file: file.to_string(),
            });
        }

        let transforms = split_list(&row.transforms)
            .map(str::parse::<Transform>)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let spec = FieldSpec::new(name)
            .with_aliases(split_list(&row.aliases))
            .with_transforms(transforms);
        ordered.push((order, spec));
    }

    ordered.sort_by_key(|(order, _)| *order);
    Ok(ordered.into_iter().map(|(_, spec)| spec).collect())
}

/// Parse a code table file, keeping file order.
pub fn load_code_table_from_str(label: &str, content: &str) -> Result<CodeTable> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(cursor);

    let mut entries = Vec::new();
    let mut seen = BTreeSet::new();

    for result in reader.deserialize::<CodeCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: label.to_string(),
            message: e.to_string(),
        })?;

        let code = row.code.trim().to_string();
        if !seen.insert(code.clone()) {
            return Err(StandardsError::Duplicate {
                kind: "code",
                value: code,
                file: label.to_string(),
            });
        }
        entries.push(CodeEntry::new(code, row.name.trim()));
    }

    Ok(CodeTable::new(label, entries))
}

/// Split a semicolon-separated cell, dropping blanks.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|part| !part.is_empty())
}
