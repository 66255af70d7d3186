//! Row shapes flowing through an import.
//!
//! A [`RawRow`] is produced by a row reader and consumed once by the field
//! mapper. A [`CanonicalRow`] is produced by the normalizer and consumed once
//! by the batch loader.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Raw column name (case-sensitive) to raw string value.
pub type RawRow = HashMap<String, String>;

/// A single normalized value handed to the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("NULL"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// An ordered tuple of values in write-statement column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalRow {
    values: Vec<FieldValue>,
}

impl CanonicalRow {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: FieldValue) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }
}

impl From<Vec<FieldValue>> for CanonicalRow {
    fn from(values: Vec<FieldValue>) -> Self {
        Self::new(values)
    }
}
