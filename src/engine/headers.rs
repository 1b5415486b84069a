// src/engine/headers.rs
//! Header recovery.
//!
//! Row 0 is always a header row. Row 1 is data if it holds at least one
//! `<td>`, otherwise it is a second header row and data starts at row 2.
//!
//! Labels come from an ordered list of strategies; the first one producing a
//! `HeaderSet` whose width fits every grid row wins. When none fit the run
//! fails with `Error::SchemaMismatch` instead of reshaping rows.

use log::{debug, info};

use crate::engine::grid;
use crate::engine::types::{Grid, HeaderSet, RawRow, RawTable};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Non-blank texts of raw row 0.
    FirstRow,
    /// Non-blank texts of raw row 1, when row 1 is a header row.
    SecondHeaderRow,
    /// All header rows span-expanded, stacked labels joined per column.
    ExpandedHeader,
    /// `0..w`, `w` = width of the first grid row.
    PositionalFirst,
    /// `0..w`, `w` = width of the second grid row.
    PositionalSecond,
}

/// Default order.
pub const STRATEGIES: &[HeaderStrategy] = &[
    HeaderStrategy::FirstRow,
    HeaderStrategy::SecondHeaderRow,
    HeaderStrategy::ExpandedHeader,
    HeaderStrategy::PositionalFirst,
    HeaderStrategy::PositionalSecond,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub headers: HeaderSet,
    pub strategy: HeaderStrategy,
}

/// Index of the first data row in `table.rows`.
pub fn data_start(table: &RawTable) -> usize {
    match table.rows.len() {
        0 => 0,
        1 => 1,
        _ if table.rows[1].has_data_cells() => 1,
        _ => 2,
    }
}

/// Split a table into (header rows, data rows).
pub fn split_rows(table: &RawTable) -> (&[RawRow], &[RawRow]) {
    table.rows.split_at(data_start(table))
}

pub fn resolve(table: &RawTable, grid: &Grid) -> Result<Resolved> {
    resolve_with(table, grid, STRATEGIES)
}

/// Try `strategies` in order.
pub fn resolve_with(table: &RawTable, grid: &Grid, strategies: &[HeaderStrategy]) -> Result<Resolved> {
    for &strategy in strategies {
        match strategy.attempt(table, grid) {
            Some(headers) => {
                info!("headers resolved by {} ({} columns)", strategy.name(), headers.width());
                return Ok(Resolved { headers, strategy });
            }
            None => debug!("header strategy {} did not fit", strategy.name()),
        }
    }

    let tried: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
    Err(Error::SchemaMismatch {
        width: grid.width().unwrap_or(0),
        detail: format!("no header strategy fits the grid (tried: {})", tried.join(", ")),
    })
}

impl HeaderStrategy {
    pub fn name(self) -> &'static str {
        match self {
            HeaderStrategy::FirstRow => "first-row",
            HeaderStrategy::SecondHeaderRow => "second-header-row",
            HeaderStrategy::ExpandedHeader => "expanded-header",
            HeaderStrategy::PositionalFirst => "positional(first-row-width)",
            HeaderStrategy::PositionalSecond => "positional(second-row-width)",
        }
    }

    /// `Some` only if the result fits every grid row.
    pub fn attempt(self, table: &RawTable, grid: &Grid) -> Option<HeaderSet> {
        match self {
            HeaderStrategy::FirstRow => {
                let row = table.rows.first()?;
                accept_labels(non_blank_texts(row), grid)
            }
            HeaderStrategy::SecondHeaderRow => {
                if data_start(table) < 2 {
                    return None;
                }
                accept_labels(non_blank_texts(&table.rows[1]), grid)
            }
            HeaderStrategy::ExpandedHeader => {
                let (header_rows, _) = split_rows(table);
                accept_labels(expanded_labels(header_rows)?, grid)
            }
            HeaderStrategy::PositionalFirst => positional(grid, 0),
            HeaderStrategy::PositionalSecond => positional(grid, 1),
        }
    }
}

fn non_blank_texts(row: &RawRow) -> Vec<String> {
    row.cells
        .iter()
        .map(|c| c.text.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn accept_labels(labels: Vec<String>, grid: &Grid) -> Option<HeaderSet> {
    if labels.is_empty() {
        return None;
    }
    match grid.width() {
        // Nothing to line up against
        None => Some(HeaderSet::Labels(labels)),
        Some(w) if labels.len() == w && grid.fits(w) => Some(HeaderSet::Labels(labels)),
        Some(_) => None,
    }
}

/// Span-expand the header block, then read each column top-down and join the
/// distinct labels: `Population` over `2010` becomes `Population 2010`.
fn expanded_labels(header_rows: &[RawRow]) -> Option<Vec<String>> {
    let block = grid::normalize(header_rows).ok()?;
    let width = block.width()?;

    let labels = (0..width)
        .map(|col| {
            let mut parts: Vec<&str> = Vec::new();
            for row in block.rows() {
                let t = row[col].trim();
                if !t.is_empty() && parts.last() != Some(&t) {
                    parts.push(t);
                }
            }
            parts.join(" ")
        })
        .collect();
    Some(labels)
}

fn positional(grid: &Grid, row: usize) -> Option<HeaderSet> {
    let width = grid.rows().get(row)?.len();
    grid.fits(width).then_some(HeaderSet::Positional(width))
}
