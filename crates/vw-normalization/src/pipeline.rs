//! Layout-driven normalization pipeline.
//!
//! A [`NormalizationPipeline`] is built once per record layout from the
//! transforms each field declares. Rules run in a fixed stage order no
//! matter how the layout lists them:
//!
//! 1. date reparsing
//! 2. suppression blanking
//! 3. case normalization
//! 4. code substitution (party, county, election type)
//! 5. boolean flag coercion
//! 6. numeric default for empty identifiers
//! 7. empty to null
//!
//! # Example
//!
//! ```ignore
//! use vw_normalization::NormalizationPipeline;
//!
//! let pipeline = NormalizationPipeline::from_layout(&layout);
//! let row = pipeline.normalize(mapped, profile.code_tables(), Some("2024-03-05"))?;
//! ```

use vw_map::MappedRow;
use vw_model::{CanonicalRow, CodeTable, CodeTables, FieldValue, RecordLayout, Transform};

use crate::codes::{county_code, election_type_code, party_code};
use crate::date::reformat_date;
use crate::error::{NormalizationError, Result};

/// Suppression sentinel written by state exports.
pub const SUPPRESSED: &str = "*";

/// A single transform bound to one canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRule {
    /// Canonical field name (e.g. "birth_date").
    pub target_field: String,
    /// Position of the field in the canonical row.
    pub field_index: usize,
    pub transform: Transform,
}

impl NormalizationRule {
    fn stage(&self) -> u8 {
        self.transform.stage()
    }
}

/// Ordered normalization rules for one record layout.
#[derive(Debug, Clone)]
pub struct NormalizationPipeline {
    rules: Vec<NormalizationRule>,
    width: usize,
    export_date: bool,
}

impl NormalizationPipeline {
    /// Derive the pipeline from a layout's field transforms.
    pub fn from_layout(layout: &RecordLayout) -> Self {
        let mut rules: Vec<NormalizationRule> = layout
            .fields
            .iter()
            .enumerate()
            .flat_map(|(field_index, field)| {
                field.transforms.iter().map(move |transform| NormalizationRule {
                    target_field: field.name.clone(),
                    field_index,
                    transform: *transform,
                })
            })
            .collect();
        // Stable: within a stage, fields keep layout order.
        rules.sort_by_key(|rule| (rule.stage(), rule.field_index));
        Self {
            rules,
            width: layout.fields.len(),
            export_date: layout.export_date,
        }
    }

    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    /// Number of values in a normalized row, including the export date.
    pub fn output_width(&self) -> usize {
        self.width + usize::from(self.export_date)
    }

    pub fn appends_export_date(&self) -> bool {
        self.export_date
    }

    /// Normalize one mapped row.
    ///
    /// `export_date` is the `YYYY-MM-DD` export date of the source file; it
    /// is required when the layout records one and ignored otherwise.
    pub fn normalize(
        &self,
        mapped: MappedRow,
        tables: &CodeTables,
        export_date: Option<&str>,
    ) -> Result<CanonicalRow> {
        if mapped.len() != self.width {
            return Err(NormalizationError::RowWidth {
                expected: self.width,
                actual: mapped.len(),
            });
        }
        let mut values: Vec<FieldValue> =
            mapped.into_values().into_iter().map(FieldValue::Text).collect();

        for rule in &self.rules {
            let current = std::mem::replace(&mut values[rule.field_index], FieldValue::Null);
            values[rule.field_index] = apply_rule(rule, current, tables)?;
        }

        let mut row = CanonicalRow::with_capacity(self.output_width());
        for value in values {
            row.push(value);
        }
        if self.export_date {
            let date = export_date.ok_or(NormalizationError::MissingExportDate)?;
            row.push(FieldValue::text(date));
        }
        Ok(row)
    }
}

fn apply_rule(
    rule: &NormalizationRule,
    value: FieldValue,
    tables: &CodeTables,
) -> Result<FieldValue> {
    let field = rule.target_field.as_str();
    match rule.transform {
        Transform::Date => map_text(value, |raw| {
            reformat_date(&raw)
                .map(|date| date.map_or(FieldValue::Null, FieldValue::Text))
                .map_err(|_| NormalizationError::InvalidDate {
                    field: field.to_string(),
                    value: raw,
                })
        }),
        Transform::Suppress => map_text(value, |raw| {
            Ok(if raw == SUPPRESSED {
                FieldValue::text("")
            } else {
                FieldValue::Text(raw)
            })
        }),
        Transform::Lowercase => map_text(value, |raw| Ok(FieldValue::Text(raw.to_lowercase()))),
        Transform::Party => {
            let table = require_table(tables.parties.as_ref(), field, rule.transform, "party")?;
            map_text(value, |raw| party_code(table, field, &raw).map(FieldValue::Text))
        }
        Transform::County => {
            let table = require_table(tables.counties.as_ref(), field, rule.transform, "county")?;
            map_text(value, |raw| county_code(table, &raw).map(FieldValue::Text))
        }
        Transform::ElectionType => {
            let table = require_table(
                tables.election_types.as_ref(),
                field,
                rule.transform,
                "election type",
            )?;
            map_text(value, |raw| {
                election_type_code(table, field, &raw).map(FieldValue::Text)
            })
        }
        Transform::Flag => Ok(FieldValue::Integer(match &value {
            FieldValue::Text(raw) if raw.eq_ignore_ascii_case("y") => 1,
            _ => 0,
        })),
        Transform::ZeroIfEmpty => Ok(match value {
            FieldValue::Text(raw) if raw.is_empty() => FieldValue::Integer(0),
            other => other,
        }),
        Transform::NullIfEmpty => Ok(match value {
            FieldValue::Text(raw) if raw.is_empty() => FieldValue::Null,
            other => other,
        }),
    }
}

/// Apply `f` to text values; nulls and integers pass through untouched.
fn map_text<F>(value: FieldValue, f: F) -> Result<FieldValue>
where
    F: FnOnce(String) -> Result<FieldValue>,
{
    match value {
        FieldValue::Text(raw) => f(raw),
        other => Ok(other),
    }
}

fn require_table<'a>(
    table: Option<&'a CodeTable>,
    field: &str,
    transform: Transform,
    name: &'static str,
) -> Result<&'a CodeTable> {
    table.ok_or_else(|| NormalizationError::MissingCodeTable {
        field: field.to_string(),
        transform: transform.token(),
        table: name,
    })
}
