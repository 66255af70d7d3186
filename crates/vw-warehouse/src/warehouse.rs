use vw_model::{CanonicalRow, DEFAULT_BATCH_CAPACITY, ImportType};

use crate::error::Result;
use crate::statement::WriteStatement;

/// Storage collaborator for the importer.
///
/// `write_many` is atomic: either every row of the call is committed or
/// none is.
pub trait Warehouse {
    /// Create missing tables and verify the existing ones. Idempotent.
    fn ensure_schema(&mut self) -> Result<()>;

    fn write_one(&mut self, statement: &WriteStatement, row: &CanonicalRow) -> Result<()>;

    fn write_many(&mut self, statement: &WriteStatement, rows: &[CanonicalRow]) -> Result<()>;

    /// Rows per `write_many` call for an import type.
    fn batch_capacity(&self, import_type: ImportType) -> usize {
        let _ = import_type;
        DEFAULT_BATCH_CAPACITY
    }
}

impl<W: Warehouse + ?Sized> Warehouse for &mut W {
    fn ensure_schema(&mut self) -> Result<()> {
        (**self).ensure_schema()
    }

    fn write_one(&mut self, statement: &WriteStatement, row: &CanonicalRow) -> Result<()> {
        (**self).write_one(statement, row)
    }

    fn write_many(&mut self, statement: &WriteStatement, rows: &[CanonicalRow]) -> Result<()> {
        (**self).write_many(statement, rows)
    }

    fn batch_capacity(&self, import_type: ImportType) -> usize {
        (**self).batch_capacity(import_type)
    }
}
