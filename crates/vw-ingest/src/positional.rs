//! Legacy byte-split rows.
//!
//! The whole entry is split on `\n`; each line is trimmed, lines shorter
//! than three bytes are noise, and the remainder is split on the delimiter
//! and matched against the canonical field names by position. Trimming
//! happens before splitting, so trailing empty fields disappear and the
//! mapper fills them with empty strings.

use vw_model::RawRow;

use crate::error::Result;

/// Lines with fewer trimmed bytes than this are skipped.
pub const MIN_LINE_LEN: usize = 3;

/// Iterator over the records of a fully buffered entry.
pub struct PositionalRows {
    data: Vec<u8>,
    position: usize,
    delimiter: u8,
    fields: Vec<String>,
}

impl PositionalRows {
    pub fn new(data: Vec<u8>, delimiter: u8, fields: &[String]) -> Self {
        Self {
            data,
            position: 0,
            delimiter,
            fields: fields.to_vec(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.fields
    }

    fn next_line(&mut self) -> Option<&[u8]> {
        if self.position >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.position..];
        let end = rest.iter().position(|b| *b == b'\n').unwrap_or(rest.len());
        self.position += end + 1;
        Some(&rest[..end])
    }
}

impl Iterator for PositionalRows {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let delimiter = self.delimiter;
        loop {
            let line = self.next_line()?.trim_ascii();
            if line.len() < MIN_LINE_LEN {
                continue;
            }
            let values: Vec<String> = line
                .split(|b| *b == delimiter)
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();
            let row = self.fields.iter().cloned().zip(values).collect();
            return Some(Ok(row));
        }
    }
}
