// src/csv.rs
use std::io::Write;

use crate::config::options::IndexColumn;
use crate::core::sanitize::transliterate;
use crate::engine::types::{Grid, HeaderSet};
use crate::error::{Error, Result};

/* ---------------- Export table ---------------- */

/// Grid rows under headers of the same width, ready to serialize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Pair grid rows with headers. A width mismatch is a schema error,
    /// rows are never padded or cut.
    pub fn new(headers: &HeaderSet, grid: Grid) -> Result<Self> {
        let width = headers.width();
        if let Some(found) = grid.width().filter(|w| *w != width || !grid.fits(width)) {
            return Err(Error::SchemaMismatch {
                width: found,
                detail: format!("{width} headers for {found} columns"),
            });
        }
        Ok(Self { headers: headers.to_labels(), rows: grid.into_rows() })
    }

    pub fn headers(&self) -> &[String] { &self.headers }
    pub fn rows(&self) -> &[Vec<String>] { &self.rows }

    /// Fold every label and cell to ASCII.
    pub fn transliterated(self) -> Self {
        Self {
            headers: self.headers.iter().map(|h| transliterate(h)).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(|c| transliterate(c)).collect())
                .collect(),
        }
    }
}

/* ---------------- Writing ---------------- */

/// Header line, then one line per row. With an index column the header
/// cell above it is empty and numbering starts at the configured base.
pub fn write_table<W: Write>(w: W, table: &ExportTable, index: IndexColumn, delim: u8) -> Result<()> {
    let mut out = ::csv::WriterBuilder::new().delimiter(delim).from_writer(w);
    let base = index.start();

    let mut header = Vec::with_capacity(table.headers.len() + 1);
    if base.is_some() { header.push(s!()); }
    header.extend(table.headers.iter().cloned());
    out.write_record(&header)?;

    for (i, row) in table.rows.iter().enumerate() {
        match base {
            Some(start) => {
                let idx = (start + i).to_string();
                out.write_record(std::iter::once(idx.as_str()).chain(row.iter().map(String::as_str)))?;
            }
            None => out.write_record(row)?,
        }
    }
    out.flush()?;
    Ok(())
}

/// Whole export as one string (tests, stdout).
pub fn to_export_string(table: &ExportTable, index: IndexColumn, delim: u8) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_table(&mut buf, table, index, delim)?;
    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}

/* ---------------- Parsing ---------------- */

/// Every record, header line included.
pub fn parse_rows(text: &str, delim: u8) -> Result<Vec<Vec<String>>> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
