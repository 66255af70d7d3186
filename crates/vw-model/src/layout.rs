//! Record layouts: canonical fields, their aliases and value transforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::import_type::ImportType;
use crate::state::StateCode;

/// Column name appended to layouts that record the export date.
pub const EXPORT_DATE_FIELD: &str = "export_date";

/// A value transform declared for a canonical field.
///
/// The normalizer always applies transforms in [`Transform::stage`] order,
/// independent of the order they were declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Transform {
    /// `MM/DD/YYYY` to `YYYY-MM-DD`; short values become null.
    Date,
    /// Exact `*` becomes the empty string.
    Suppress,
    Lowercase,
    /// Party name to party code by normalized prefix.
    Party,
    /// County name to county code, falling back to `UNKNOWN`.
    County,
    /// Election type name to code by exact match.
    ElectionType,
    /// Case-insensitive `Y` to 1, anything else to 0.
    Flag,
    ZeroIfEmpty,
    NullIfEmpty,
}

impl Transform {
    /// Pipeline stage, lowest first.
    pub fn stage(self) -> u8 {
        match self {
            Transform::Date => 1,
            Transform::Suppress => 2,
            Transform::Lowercase => 3,
            Transform::Party | Transform::County | Transform::ElectionType => 4,
            Transform::Flag => 5,
            Transform::ZeroIfEmpty => 6,
            Transform::NullIfEmpty => 7,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Transform::Date => "date",
            Transform::Suppress => "suppress",
            Transform::Lowercase => "lowercase",
            Transform::Party => "party",
            Transform::County => "county",
            Transform::ElectionType => "election_type",
            Transform::Flag => "flag",
            Transform::ZeroIfEmpty => "zero_if_empty",
            Transform::NullIfEmpty => "null_if_empty",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Transform {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Transform::Date),
            "suppress" => Ok(Transform::Suppress),
            "lowercase" => Ok(Transform::Lowercase),
            "party" => Ok(Transform::Party),
            "county" => Ok(Transform::County),
            "election_type" => Ok(Transform::ElectionType),
            "flag" => Ok(Transform::Flag),
            "zero_if_empty" => Ok(Transform::ZeroIfEmpty),
            "null_if_empty" => Ok(Transform::NullIfEmpty),
            other => Err(ModelError::UnknownTransform(other.to_string())),
        }
    }
}

/// One canonical field of a record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Canonical (warehouse column) name.
    pub name: String,
    /// Alternate raw column names, in priority order.
    pub aliases: Vec<String>,
    /// Value transforms, in declaration order.
    pub transforms: Vec<Transform>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            transforms: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_transforms(mut self, transforms: impl IntoIterator<Item = Transform>) -> Self {
        self.transforms = transforms.into_iter().collect();
        self
    }

    pub fn has_transform(&self, transform: Transform) -> bool {
        self.transforms.contains(&transform)
    }
}

/// Where a delimited reader takes its column names from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderSource {
    /// The first record of the file is the header.
    Embedded,
    /// The file has no header; canonical field names are used by position.
    Supplied,
}

/// How a row reader decodes an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Delimited text decoded with a CSV reader.
    Delimited {
        delimiter: u8,
        quoting: bool,
        headers: HeaderSource,
    },
    /// Legacy byte-split reading: one record per `\n`, fields split on the
    /// delimiter and matched positionally against the canonical field names.
    Positional { delimiter: u8 },
}

impl SourceFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            SourceFormat::Delimited { delimiter, .. } | SourceFormat::Positional { delimiter } => {
                delimiter
            }
        }
    }
}

/// Everything needed to turn one kind of raw record into a canonical row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub state: StateCode,
    pub import_type: ImportType,
    pub fields: Vec<FieldSpec>,
    pub format: SourceFormat,
    /// Whether the archive entry's modification date is appended to each row.
    pub export_date: bool,
}

impl RecordLayout {
    /// Canonical field names in output order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Warehouse columns written for this layout, including `export_date`.
    pub fn column_names(&self) -> Vec<&str> {
        let mut columns = self.field_names();
        if self.export_date {
            columns.push(EXPORT_DATE_FIELD);
        }
        columns
    }

    pub fn table_name(&self) -> &'static str {
        self.import_type.table_name()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Swap the source format, keeping every other setting.
    #[must_use]
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }
}
