//! Delimited text rows via the `csv` crate.
//!
//! Exports are not reliably UTF-8, so records are read as bytes and each
//! field is decoded lossily. Records made only of whitespace are dropped
//! before they reach the mapper.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use vw_model::{HeaderSource, RawRow};

use crate::error::{IngestError, Result};

/// Lazily decodes delimited records into raw rows.
pub struct DelimitedRows<R: Read> {
    entry: String,
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: ByteRecord,
    done: bool,
}

impl<R: Read> DelimitedRows<R> {
    /// Start reading `source`.
    ///
    /// With [`HeaderSource::Embedded`] the first non-blank record is consumed
    /// as the header; with [`HeaderSource::Supplied`] `fields` are used by
    /// position.
    pub fn new(
        entry: &str,
        source: R,
        delimiter: u8,
        quoting: bool,
        headers: HeaderSource,
        fields: &[String],
    ) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .quoting(quoting)
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut rows = Self {
            entry: entry.to_string(),
            reader,
            headers: Vec::new(),
            record: ByteRecord::new(),
            done: false,
        };

        rows.headers = match headers {
            HeaderSource::Supplied => fields.to_vec(),
            HeaderSource::Embedded => match rows.next_record()? {
                Some(header) => header.into_iter().map(|h| normalize_header(&h)).collect(),
                None => Vec::new(),
            },
        };
        Ok(rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Next record that is not blank, decoded field by field.
    fn next_record(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            let more = self
                .reader
                .read_byte_record(&mut self.record)
                .map_err(|source| IngestError::Csv {
                    entry: self.entry.clone(),
                    source,
                })?;
            if !more {
                return Ok(None);
            }
            if is_blank(&self.record) {
                continue;
            }
            let fields = self
                .record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();
            return Ok(Some(fields));
        }
    }
}

impl<R: Read> Iterator for DelimitedRows<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(values)) => Some(Ok(self
                .headers
                .iter()
                .cloned()
                .zip(values)
                .collect())),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

fn is_blank(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|field| field.iter().all(u8::is_ascii_whitespace))
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}
