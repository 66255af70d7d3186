//! SQLite warehouse backend.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info};

use vw_model::{
    CanonicalRow, CodeTable, DEFAULT_BATCH_CAPACITY, FieldValue, ImportProfile, ImportType,
    RecordLayout, StateCode,
};

use crate::config::StateConfig;
use crate::error::{Result, WarehouseError};
use crate::schema::schema_for;
use crate::statement::WriteStatement;
use crate::warehouse::Warehouse;

const MEMORY_PATH: &str = ":memory:";

/// One state's warehouse in a SQLite database.
///
/// The connection is closed when the warehouse is dropped.
pub struct SqliteWarehouse {
    conn: Connection,
    path: PathBuf,
    state: StateCode,
    layouts: Vec<RecordLayout>,
    counties: Option<CodeTable>,
    batch_limits: BTreeMap<ImportType, usize>,
}

impl std::fmt::Debug for SqliteWarehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteWarehouse")
            .field("path", &self.path)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SqliteWarehouse {
    /// Open (or create) the database at `path` for `profile`'s state.
    pub fn open(path: impl AsRef<Path>, profile: &dyn ImportProfile) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| WarehouseError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(&path).map_err(|source| WarehouseError::Open {
            path: path.clone(),
            source,
        })?;
        configure_connection(&conn);
        debug!(path = %path.display(), "opened warehouse database");
        Ok(Self::with_connection(conn, path, profile))
    }

    /// Open the database named by a state's configuration section.
    pub fn from_config(config: &StateConfig, profile: &dyn ImportProfile) -> Result<Self> {
        Self::open(&config.database.path, profile)
    }

    /// Private in-memory database, mainly for tests.
    pub fn in_memory(profile: &dyn ImportProfile) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| WarehouseError::Open {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;
        Ok(Self::with_connection(conn, PathBuf::from(MEMORY_PATH), profile))
    }

    fn with_connection(conn: Connection, path: PathBuf, profile: &dyn ImportProfile) -> Self {
        let import_types = profile.import_types();
        Self {
            conn,
            path,
            state: profile.state(),
            layouts: import_types
                .iter()
                .filter_map(|t| profile.layout(*t).cloned())
                .collect(),
            counties: profile.code_tables().counties.clone(),
            batch_limits: import_types
                .iter()
                .map(|t| (*t, profile.batch_capacity(*t)))
                .collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of rows currently stored in `table`.
    ///
    /// Only the `Counties` table and the tables of this state's layouts can
    /// be counted.
    pub fn count_rows(&self, table: &str) -> Result<u64> {
        let known = table == WriteStatement::counties().table()
            || self.layouts.iter().any(|layout| layout.table_name() == table);
        if !known {
            return Err(WarehouseError::MissingTable {
                table: table.to_string(),
            });
        }
        let sql = format!("SELECT COUNT(*) FROM {table}");
        self.conn
            .query_row(&sql, [], |row| row.get::<_, i64>(0))
            .map(|count| u64::try_from(count).unwrap_or(0))
            .map_err(WarehouseError::sqlite("count"))
    }

    fn table_columns(&self, table: &str) -> Result<HashSet<String>> {
        let mut statement = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1)")
            .map_err(WarehouseError::sqlite("inspect schema"))?;
        let columns = statement
            .query_map([table], |row| row.get::<_, String>(0))
            .map_err(WarehouseError::sqlite("inspect schema"))?
            .collect::<std::result::Result<HashSet<_>, _>>()
            .map_err(WarehouseError::sqlite("inspect schema"))?;
        Ok(columns)
    }

    fn verify_layouts(&self) -> Result<()> {
        for layout in &self.layouts {
            let table = layout.table_name();
            let existing = self.table_columns(table)?;
            if existing.is_empty() {
                return Err(WarehouseError::MissingTable {
                    table: table.to_string(),
                });
            }
            let missing: Vec<String> = layout
                .column_names()
                .into_iter()
                .filter(|column| !existing.contains(*column))
                .map(str::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(WarehouseError::SchemaMismatch {
                    table: table.to_string(),
                    missing,
                });
            }
        }
        Ok(())
    }

    fn seed_counties(&mut self) -> Result<usize> {
        let Some(counties) = &self.counties else {
            return Ok(0);
        };
        let rows: Vec<CanonicalRow> = counties
            .entries()
            .iter()
            .map(|entry| {
                CanonicalRow::new(vec![
                    FieldValue::text(entry.code.as_str()),
                    FieldValue::text(entry.name.as_str()),
                ])
            })
            .collect();
        let statement = WriteStatement::counties();
        for row in &rows {
            self.write_one(&statement, row)?;
        }
        Ok(rows.len())
    }
}

fn configure_connection(conn: &Connection) {
    // journal_mode returns a row, which execute_batch would reject.
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
}

fn sql_value(value: &FieldValue) -> ToSqlOutput<'_> {
    match value {
        FieldValue::Null => ToSqlOutput::Owned(Value::Null),
        FieldValue::Integer(number) => ToSqlOutput::Owned(Value::Integer(*number)),
        FieldValue::Text(text) => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
    }
}

fn check_arity(statement: &WriteStatement, row: &CanonicalRow) -> Result<()> {
    if row.len() == statement.arity() {
        Ok(())
    } else {
        Err(WarehouseError::ArityMismatch {
            table: statement.table().to_string(),
            expected: statement.arity(),
            actual: row.len(),
        })
    }
}

impl Warehouse for SqliteWarehouse {
    fn ensure_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(schema_for(self.state))
            .map_err(WarehouseError::sqlite("create schema"))?;
        let seeded = self.seed_counties()?;
        self.verify_layouts()?;
        info!(state = %self.state, counties = seeded, "warehouse schema ready");
        Ok(())
    }

    fn write_one(&mut self, statement: &WriteStatement, row: &CanonicalRow) -> Result<()> {
        check_arity(statement, row)?;
        let mut prepared = self
            .conn
            .prepare_cached(statement.sql())
            .map_err(WarehouseError::sqlite("prepare"))?;
        prepared
            .execute(params_from_iter(row.values().iter().map(sql_value)))
            .map_err(WarehouseError::sqlite("write"))?;
        Ok(())
    }

    fn write_many(&mut self, statement: &WriteStatement, rows: &[CanonicalRow]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(WarehouseError::sqlite("begin transaction"))?;
        {
            let mut prepared = tx
                .prepare_cached(statement.sql())
                .map_err(WarehouseError::sqlite("prepare"))?;
            for row in rows {
                // Returning early drops the transaction, which rolls it back.
                check_arity(statement, row)?;
                prepared
                    .execute(params_from_iter(row.values().iter().map(sql_value)))
                    .map_err(WarehouseError::sqlite("write"))?;
            }
        }
        tx.commit()
            .map_err(WarehouseError::sqlite("commit transaction"))?;
        debug!(table = statement.table(), rows = rows.len(), "committed batch");
        Ok(())
    }

    fn batch_capacity(&self, import_type: ImportType) -> usize {
        self.batch_limits
            .get(&import_type)
            .copied()
            .unwrap_or(DEFAULT_BATCH_CAPACITY)
    }
}
