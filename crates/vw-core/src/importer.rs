//! Import orchestration.
//!
//! One run imports one archive for one state and import type:
//!
//! 1. resolve the import type against the profile (no I/O yet)
//! 2. ensure the warehouse schema
//! 3. for each archive entry in order: read, map, normalize, batch
//! 4. return an [`ImportSummary`]
//!
//! The first error ends the run; rows already committed stay committed.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{Level, debug, error, info, info_span, trace, warn};

use vw_ingest::{ArchiveEntry, ZipSource};
use vw_map::FieldMapper;
use vw_model::{ImportProfile, ImportType, RecordLayout, StateCode};
use vw_normalization::NormalizationPipeline;
use vw_warehouse::{Warehouse, WriteStatement};

use crate::batch::{BatchLoader, FileSummary};
use crate::error::{ImportError, Result};
use crate::redaction::redact_value;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Idle,
    SchemaReady,
    /// Reading and normalizing rows of an entry.
    Reading,
    /// Writing the final batch of an entry.
    Flushing,
    Done,
    Failed,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub state: StateCode,
    pub import_type: ImportType,
    pub files: Vec<FileSummary>,
    pub total_records: usize,
    pub elapsed: Duration,
}

impl ImportSummary {
    pub fn total_batches(&self) -> usize {
        self.files.iter().map(|file| file.batches).sum()
    }
}

/// Drives one import through a profile and a warehouse.
pub struct Importer<'p, P: ImportProfile + ?Sized, W: Warehouse> {
    profile: &'p P,
    warehouse: W,
    phase: ImportPhase,
}

/// Per-layout state shared by every entry of a run.
struct Plan<'p> {
    import_type: ImportType,
    layout: &'p RecordLayout,
    field_names: Vec<String>,
    mapper: FieldMapper,
    pipeline: NormalizationPipeline,
    statement: WriteStatement,
    capacity: usize,
}

impl<'p, P: ImportProfile + ?Sized, W: Warehouse> Importer<'p, P, W> {
    pub fn new(profile: &'p P, warehouse: W) -> Self {
        Self {
            profile,
            warehouse,
            phase: ImportPhase::Idle,
        }
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    pub fn warehouse(&self) -> &W {
        &self.warehouse
    }

    pub fn into_warehouse(self) -> W {
        self.warehouse
    }

    /// Import every entry of `archive` as `import_type_key` records.
    pub fn run(&mut self, archive: impl AsRef<Path>, import_type_key: &str) -> Result<ImportSummary> {
        let state = self.profile.state();
        let span = info_span!("import", state = %state, import_type = import_type_key);
        let _guard = span.enter();

        let result = self.run_inner(archive.as_ref(), import_type_key);
        match &result {
            Ok(summary) => {
                self.phase = ImportPhase::Done;
                info!(
                    files = summary.files.len(),
                    records = summary.total_records,
                    elapsed_ms = summary.elapsed.as_millis(),
                    "import complete"
                );
            }
            Err(err) => {
                self.phase = ImportPhase::Failed;
                error!(error = %err, "import failed");
            }
        }
        result
    }

    /// Check `key` against the profile's import types.
    pub fn resolve_import_type(&self, key: &str) -> Result<ImportType> {
        resolve_import_type(self.profile, key)
    }

    fn run_inner(&mut self, archive: &Path, import_type_key: &str) -> Result<ImportSummary> {
        let started = Instant::now();
        let import_type = self.resolve_import_type(import_type_key)?;
        let profile = self.profile;
        let plan = plan_for(profile, import_type, self.warehouse.batch_capacity(import_type))?;

        self.warehouse.ensure_schema()?;
        self.phase = ImportPhase::SchemaReady;

        let mut source = ZipSource::open(archive)?;
        let entries = source.entries()?;
        info!(archive = %archive.display(), entries = entries.len(), "opened archive");

        let mut files = Vec::new();
        for entry in entries.iter().filter(|entry| !entry.is_dir) {
            let span = info_span!("file", entry = %entry.name);
            let _guard = span.enter();
            files.push(self.import_entry(&mut source, entry, &plan)?);
        }
        if files.is_empty() {
            warn!(archive = %archive.display(), "archive holds no files");
        }

        let total_records = files.iter().map(|file| file.records).sum();
        Ok(ImportSummary {
            state: profile.state(),
            import_type,
            files,
            total_records,
            elapsed: started.elapsed(),
        })
    }

    fn import_entry(
        &mut self,
        zip: &mut ZipSource,
        entry: &ArchiveEntry,
        plan: &Plan<'_>,
    ) -> Result<FileSummary> {
        self.phase = ImportPhase::Reading;
        info!(
            modified = ?entry.modified,
            size = entry.size,
            compressed_size = entry.compressed_size,
            "reading entry"
        );

        let export_date = if plan.layout.export_date {
            Some(entry.require_export_date()?)
        } else {
            None
        };

        let profile = self.profile;
        let tables = profile.code_tables();
        let rows = zip.rows(entry, plan.layout.format, &plan.field_names)?;
        for resolution in plan.mapper.resolve_columns(rows.headers()) {
            match &resolution.source {
                Some(column) => debug!(field = %resolution.field, column = %column, "resolved column"),
                None => warn!(field = %resolution.field, "no source column, defaulting to empty"),
            }
        }

        let mut loader = BatchLoader::new(
            &mut self.warehouse,
            &plan.statement,
            plan.import_type,
            entry.name.as_str(),
            plan.capacity,
        )?;
        let mut record = 0usize;
        for raw in rows {
            let raw = raw?;
            record += 1;
            let mapped = plan.mapper.map(&raw);
            let row = plan
                .pipeline
                .normalize(mapped, tables, export_date.as_deref())
                .map_err(|source| ImportError::Normalization {
                    entry: entry.name.clone(),
                    record,
                    source,
                })?;
            if tracing::enabled!(Level::TRACE) {
                let rendered = row
                    .values()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("|");
                trace!(record, row = redact_value(&rendered), "normalized row");
            }
            loader.append(row)?;
        }

        self.phase = ImportPhase::Flushing;
        let summary = loader.finalize(export_date)?;
        info!(records = summary.records, batches = summary.batches, "entry complete");
        Ok(summary)
    }
}

/// Parse an import type key and check that `profile` supports it.
///
/// Touches neither the archive nor the warehouse.
pub fn resolve_import_type<P: ImportProfile + ?Sized>(profile: &P, key: &str) -> Result<ImportType> {
    let supported = profile.import_types();
    key.parse::<ImportType>()
        .ok()
        .filter(|import_type| supported.contains(import_type))
        .ok_or_else(|| ImportError::UnsupportedImportType {
            state: profile.state().display_name().to_string(),
            import_type: key.to_string(),
            supported: supported
                .iter()
                .map(|t| t.key())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn plan_for<P: ImportProfile + ?Sized>(
    profile: &P,
    import_type: ImportType,
    capacity: usize,
) -> Result<Plan<'_>> {
    let layout = profile
        .layout(import_type)
        .ok_or_else(|| ImportError::UnsupportedImportType {
            state: profile.state().display_name().to_string(),
            import_type: import_type.key().to_string(),
            supported: String::new(),
        })?;
    let mapper = FieldMapper::new(&layout.fields)?;
    Ok(Plan {
        import_type,
        layout,
        field_names: layout.fields.iter().map(|f| f.name.clone()).collect(),
        mapper,
        pipeline: NormalizationPipeline::from_layout(layout),
        statement: WriteStatement::for_layout(layout),
        capacity,
    })
}
