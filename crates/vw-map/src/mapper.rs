//! Alias resolution from raw rows to canonical fields.

use std::collections::BTreeSet;

use vw_model::{FieldSpec, RawRow};

use crate::error::MappingError;

/// A raw row projected onto the canonical field list.
///
/// Values are trimmed and held in canonical field order. A field that had no
/// source column holds the empty string, never a missing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    values: Vec<String>,
}

impl MappedRow {
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

/// Which raw column will feed a canonical field, given a file's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub field: String,
    /// `None` when neither the field name nor any alias is in the header.
    pub source: Option<String>,
}

#[derive(Debug, Clone)]
struct MappedField {
    name: String,
    aliases: Vec<String>,
}

impl MappedField {
    /// The field's own name first, then aliases in declaration order.
    fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Maps raw rows onto one layout's canonical fields.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    fields: Vec<MappedField>,
}

impl FieldMapper {
    /// Build a mapper for `fields`, rejecting blank or repeated names.
    pub fn new(fields: &[FieldSpec]) -> Result<Self, MappingError> {
        let mut seen = BTreeSet::new();
        let mut mapped = Vec::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            let name = field.name.trim();
            if name.is_empty() {
                return Err(MappingError::EmptyFieldName { position });
            }
            if !seen.insert(name) {
                return Err(MappingError::DuplicateField(name.to_string()));
            }
            mapped.push(MappedField {
                name: name.to_string(),
                aliases: field.aliases.clone(),
            });
        }
        Ok(Self { fields: mapped })
    }

    /// Canonical field names in output order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Value of a canonical field in a row produced by this mapper.
    pub fn value<'r>(&self, row: &'r MappedRow, name: &str) -> Option<&'r str> {
        self.index_of(name).and_then(|index| row.get(index))
    }

    /// Project a raw row onto the canonical fields.
    ///
    /// The canonical name wins over any alias; aliases are tried in
    /// declaration order and the first one present is taken. Missing fields
    /// become the empty string.
    pub fn map(&self, raw: &RawRow) -> MappedRow {
        let values = self
            .fields
            .iter()
            .map(|field| {
                field
                    .candidates()
                    .find_map(|column| raw.get(column))
                    .map(|value| value.trim().to_string())
                    .unwrap_or_default()
            })
            .collect();
        MappedRow { values }
    }

    /// Resolve which header column will supply each canonical field.
    pub fn resolve_columns<S: AsRef<str>>(&self, headers: &[S]) -> Vec<ColumnResolution> {
        self.fields
            .iter()
            .map(|field| ColumnResolution {
                field: field.name.clone(),
                source: field
                    .candidates()
                    .find(|candidate| headers.iter().any(|h| h.as_ref() == *candidate))
                    .map(str::to_string),
            })
            .collect()
    }
}
