//! Parameterized write statements.

use vw_model::RecordLayout;

/// Conflict policy of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the row sharing the primary key.
    Replace,
    /// Keep the existing row.
    InsertOrIgnore,
}

impl WriteMode {
    fn verb(self) -> &'static str {
        match self {
            Self::Replace => "REPLACE INTO",
            Self::InsertOrIgnore => "INSERT OR IGNORE INTO",
        }
    }
}

/// A prepared-statement template bound to one table and column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStatement {
    table: String,
    columns: Vec<String>,
    sql: String,
}

impl WriteStatement {
    pub fn new<S: AsRef<str>>(mode: WriteMode, table: &str, columns: &[S]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let placeholders = (1..=columns.len())
            .map(|n| format!("?{n}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "{} {table} ({}) VALUES ({placeholders})",
            mode.verb(),
            columns.join(", ")
        );
        Self {
            table: table.to_string(),
            columns,
            sql,
        }
    }

    /// Replace statement for every column a layout writes.
    pub fn for_layout(layout: &RecordLayout) -> Self {
        Self::new(WriteMode::Replace, layout.table_name(), &layout.column_names())
    }

    /// Seed statement for the county lookup table.
    pub fn counties() -> Self {
        Self::new(WriteMode::InsertOrIgnore, "Counties", &["county_code", "name"])
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of bound parameters.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use vw_model::{FieldSpec, ImportType, SourceFormat, StateCode};

    use super::*;

    #[test]
    fn layout_statement_includes_export_date() {
        let layout = RecordLayout {
            state: StateCode::Florida,
            import_type: ImportType::Histories,
            fields: ["county_code", "voter_id", "election_date", "election_type", "history_code"]
                .into_iter()
                .map(FieldSpec::new)
                .collect(),
            format: SourceFormat::Positional { delimiter: b'\t' },
            export_date: true,
        };
        let statement = WriteStatement::for_layout(&layout);
        assert_eq!(statement.arity(), 6);
        insta::assert_snapshot!(statement.sql(), @"REPLACE INTO Histories (county_code, voter_id, election_date, election_type, history_code, export_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)");
    }

    #[test]
    fn county_seed_statement() {
        insta::assert_snapshot!(WriteStatement::counties().sql(), @"INSERT OR IGNORE INTO Counties (county_code, name) VALUES (?1, ?2)");
    }
}
