// src/table/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};
use tracing::{debug, instrument};

use crate::error::FilterError;

pub mod delimiter;

pub use delimiter::{delimiter_for_path, parse_delimiter};

/// A fully materialized delimited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names exactly as they appear in the header row.
    pub headers: Vec<String>,
    /// One entry per data row; always `headers.len()` values long.
    pub rows: Vec<Vec<String>>,
}

/// Borrowed view of one row, keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    pub fn new(headers: &'a [String], values: &'a [String]) -> Self {
        Self { headers, values }
    }

    /// Value of `name` (case-insensitive), or `""` when the column is absent.
    pub fn get(&self, name: &str) -> &'a str {
        column_index(self.headers, name)
            .map(|idx| self.value_at(idx))
            .unwrap_or("")
    }

    pub fn value_at(&self, idx: usize) -> &'a str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Header lookup shared by records and the column resolver.
///
/// A repeated header name resolves to its last occurrence.
pub(crate) fn column_index(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim().to_lowercase();
    headers
        .iter()
        .rposition(|h| h.trim().to_lowercase() == wanted)
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows
            .iter()
            .map(move |row| Record::new(&self.headers, row))
    }

    /// Keep the rows for which `keep` returns true, in their original order.
    pub fn retain_matching<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Record<'_>) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| keep(&Record::new(&self.headers, row)))
            .cloned()
            .collect();
        Table {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Parse a header-bearing delimited stream. `source` names the input in errors.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8, source: &Path) -> Result<Table> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true) // short rows are padded below, long ones rejected
            .from_reader(reader);

        let mut headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading header row of {}", source.display()))?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        if headers.is_empty() {
            return Err(FilterError::NoHeader {
                path: source.to_path_buf(),
            }
            .into());
        }

        let width = headers.len();
        let mut table = Table::new(headers);
        for result in rdr.records() {
            let record = result.with_context(|| format!("CSV parse error in {}", source.display()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() > width {
                return Err(FilterError::Malformed {
                    path: source.to_path_buf(),
                    line,
                    expected: width,
                    found: record.len(),
                }
                .into());
            }
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(width, String::new());
            table.rows.push(row);
        }

        Ok(table)
    }

    /// Read `path` completely into memory.
    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn read_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FilterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Table::from_reader(file, delimiter, path)?;
        debug!(
            columns = table.headers.len(),
            rows = table.len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Write header then rows as comma-separated CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().delimiter(b',').from_writer(writer);
        wtr.write_record(&self.headers)
            .context("writing header row")?;
        for row in &self.rows {
            wtr.write_record(row).context("writing data row")?;
        }
        wtr.flush().context("flushing CSV output")?;
        Ok(())
    }

    /// Create `path` and write the table to it.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| FilterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(file)
            .with_context(|| format!("writing {}", path.display()))
    }
}
