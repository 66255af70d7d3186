//! Batched writes for one source file.

use serde::Serialize;
use tracing::info;

use vw_model::{CanonicalRow, ImportType};
use vw_warehouse::{Warehouse, WriteStatement};

use crate::error::{ImportError, Result};

/// Counts reported once a file is fully written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Archive entry name.
    pub entry: String,
    pub records: usize,
    pub batches: usize,
    /// Export date stamped on the file's rows, when the layout records one.
    pub export_date: Option<String>,
}

/// Accumulates canonical rows and hands them to the warehouse in batches of
/// `capacity`.
///
/// Flushed batches hold exactly `capacity` rows except the last one of a
/// file. A failed write is returned immediately and the rows of that batch
/// are discarded.
pub struct BatchLoader<'a, W: Warehouse + ?Sized> {
    warehouse: &'a mut W,
    statement: &'a WriteStatement,
    entry: String,
    capacity: usize,
    batch: Vec<CanonicalRow>,
    total: usize,
    batches: usize,
}

impl<'a, W: Warehouse + ?Sized> BatchLoader<'a, W> {
    pub fn new(
        warehouse: &'a mut W,
        statement: &'a WriteStatement,
        import_type: ImportType,
        entry: impl Into<String>,
        capacity: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(ImportError::InvalidBatchCapacity {
                import_type: import_type.key().to_string(),
            });
        }
        Ok(Self {
            warehouse,
            statement,
            entry: entry.into(),
            capacity,
            batch: Vec::with_capacity(capacity.min(8192)),
            total: 0,
            batches: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rows waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Rows written so far.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn append(&mut self, row: CanonicalRow) -> Result<()> {
        self.batch.push(row);
        if self.batch.len() >= self.capacity {
            self.flush()?;
        }
        Ok(())
    }

    /// Write the pending rows in one warehouse call. No-op when empty.
    pub fn flush(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let rows = std::mem::take(&mut self.batch);
        self.warehouse.write_many(self.statement, &rows)?;
        self.total += rows.len();
        self.batches += 1;
        info!(
            batch_size = rows.len(),
            total = self.total,
            table = self.statement.table(),
            "flushed batch"
        );
        Ok(())
    }

    /// Flush the final partial batch and report the file's counts.
    pub fn finalize(mut self, export_date: Option<String>) -> Result<FileSummary> {
        self.flush()?;
        Ok(FileSummary {
            entry: self.entry,
            records: self.total,
            batches: self.batches,
            export_date,
        })
    }
}
