//! Zip archive access.
//!
//! State exports arrive as a single zip holding one text file per county
//! (or one file for the whole state). Entries are visited in archive order;
//! each entry's modification time doubles as the export date for layouts
//! that record one.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use zip::ZipArchive;

use vw_model::{RawRow, SourceFormat};

use crate::delimited::DelimitedRows;
use crate::error::{IngestError, Result};
use crate::positional::PositionalRows;

/// Metadata for one archive member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub index: usize,
    pub name: String,
    /// Modification time as recorded in the archive, if valid.
    pub modified: Option<NaiveDateTime>,
    pub size: u64,
    pub compressed_size: u64,
    pub is_dir: bool,
}

impl ArchiveEntry {
    /// Modification date as `YYYY-MM-DD`.
    pub fn export_date(&self) -> Option<String> {
        self.modified
            .map(|modified| modified.date().format("%Y-%m-%d").to_string())
    }

    /// Like [`ArchiveEntry::export_date`] but an error when absent.
    pub fn require_export_date(&self) -> Result<String> {
        self.export_date()
            .ok_or_else(|| IngestError::MissingModifiedTime {
                entry: self.name.clone(),
            })
    }
}

fn to_naive(value: zip::DateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(
        i32::from(value.year()),
        u32::from(value.month()),
        u32::from(value.day()),
    )?
    .and_hms_opt(
        u32::from(value.hour()),
        u32::from(value.minute()),
        u32::from(value.second()),
    )
}

/// An opened export archive.
pub struct ZipSource {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl ZipSource {
    /// Open the archive at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(IngestError::ArchiveNotFound { path });
        }
        let file = File::open(&path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        })?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|source| {
            IngestError::Archive {
                path: path.clone(),
                source,
            }
        })?;
        debug!(path = %path.display(), entries = archive.len(), "opened archive");
        Ok(Self { path, archive })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// All members in archive order, directories included.
    pub fn entries(&mut self) -> Result<Vec<ArchiveEntry>> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self.archive.by_index(index).map_err(|source| IngestError::Entry {
                entry: format!("#{index}"),
                source,
            })?;
            entries.push(ArchiveEntry {
                index,
                name: file.name().to_string(),
                modified: file.last_modified().and_then(to_naive),
                size: file.size(),
                compressed_size: file.compressed_size(),
                is_dir: file.is_dir(),
            });
        }
        Ok(entries)
    }

    /// Rows of one entry decoded per `format`.
    ///
    /// `fields` are the canonical field names, used as column names when the
    /// file carries no header of its own.
    pub fn rows(
        &mut self,
        entry: &ArchiveEntry,
        format: SourceFormat,
        fields: &[String],
    ) -> Result<RowIter<'_>> {
        let mut file = self
            .archive
            .by_index(entry.index)
            .map_err(|source| IngestError::Entry {
                entry: entry.name.clone(),
                source,
            })?;

        let inner = match format {
            SourceFormat::Delimited {
                delimiter,
                quoting,
                headers,
            } => {
                let reader: Box<dyn Read + '_> = Box::new(file);
                RowSource::Delimited(DelimitedRows::new(
                    &entry.name,
                    reader,
                    delimiter,
                    quoting,
                    headers,
                    fields,
                )?)
            }
            SourceFormat::Positional { delimiter } => {
                let mut data = Vec::with_capacity(usize::try_from(entry.size).unwrap_or(0));
                file.read_to_end(&mut data)
                    .map_err(|source| IngestError::EntryRead {
                        entry: entry.name.clone(),
                        source,
                    })?;
                RowSource::Positional(PositionalRows::new(data, delimiter, fields))
            }
        };
        Ok(RowIter { inner })
    }
}

enum RowSource<'a> {
    Delimited(DelimitedRows<Box<dyn Read + 'a>>),
    Positional(PositionalRows),
}

/// Raw rows of a single archive entry.
pub struct RowIter<'a> {
    inner: RowSource<'a>,
}

impl RowIter<'_> {
    /// Column names the rows are keyed by.
    pub fn headers(&self) -> &[String] {
        match &self.inner {
            RowSource::Delimited(rows) => rows.headers(),
            RowSource::Positional(rows) => rows.headers(),
        }
    }
}

impl Iterator for RowIter<'_> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            RowSource::Delimited(rows) => rows.next(),
            RowSource::Positional(rows) => rows.next(),
        }
    }
}
