// src/engine/grid.rs
//! Span expansion: raw rows in, rectangular grid out.
//!
//! One forward pass over the rows. A `rowspan` cell schedules its text into
//! the rows below it (the pending map); those slots are filled in before the
//! next literal cell of the target row is placed, and again after the row's
//! last literal cell for trailing columns. A `colspan` cell is simply repeated.
//!
//! ```text
//!  <td rowspan=2>x</td><td>1</td>      ->  x 1
//!  <td>2</td>                          ->  x 2
//! ```
//!
//! Overlapping claims, spans that are never reached and ragged rows are
//! reported as `Error::MalformedTable`; nothing is padded or truncated.

use std::collections::{BTreeMap, HashMap};
use std::iter::repeat_n;

use log::debug;

use crate::engine::types::{Grid, RawRow};
use crate::error::{Malformed, Result};

/// row index -> (column index -> text). Each row's map is taken out when the
/// row starts, so every entry is read at most once.
type PendingSpans = HashMap<usize, BTreeMap<usize, String>>;

/// Expand `rows` into a rectangular grid.
pub fn normalize(rows: &[RawRow]) -> Result<Grid> {
    let mut pending: PendingSpans = HashMap::new();
    let mut out: Vec<Vec<String>> = Vec::with_capacity(rows.len());

    for (r, row) in rows.iter().enumerate() {
        let mut carried = pending.remove(&r).unwrap_or_default();
        let mut line: Vec<String> = Vec::with_capacity(row.span_width() + carried.len());
        let mut c = 0usize;

        for cell in &row.cells {
            drain(&mut carried, &mut line, &mut c);

            let colspan = cell.colspan.max(1);
            let rowspan = cell.rowspan.max(1);

            // A still-pending column inside this cell's horizontal reach.
            if let Some((&col, _)) = carried.range(c..c + colspan).next() {
                return Err(Malformed::OverlappingSpan { row: r, col }.into());
            }

            line.extend(repeat_n(cell.text.clone(), colspan));

            // Rowspans past the last row are cut at the table end.
            // The slots below are free: an earlier claim on any of them also
            // covers this row, and the range check above has ruled that out.
            let last = (r + rowspan).min(rows.len());
            for target in r + 1..last {
                let slots = pending.entry(target).or_default();
                for col in c..c + colspan {
                    slots.insert(col, cell.text.clone());
                }
            }

            c += colspan;
        }

        drain(&mut carried, &mut line, &mut c);
        if let Some((&col, _)) = carried.iter().next() {
            return Err(Malformed::UnreachedSpan { row: r, col }.into());
        }

        out.push(line);
    }

    check_rectangular(&out)?;
    debug!(
        "normalized {} rows x {} columns",
        out.len(),
        out.first().map_or(0, Vec::len)
    );
    Ok(Grid::from_rows_unchecked(out))
}

/// Emit consecutive carried-over cells starting at the cursor.
fn drain(carried: &mut BTreeMap<usize, String>, line: &mut Vec<String>, c: &mut usize) {
    while let Some(text) = carried.remove(&*c) {
        line.push(text);
        *c += 1;
    }
}

fn check_rectangular(rows: &[Vec<String>]) -> Result<()> {
    let Some(expected) = rows.first().map(Vec::len) else { return Ok(()) };
    for (row, r) in rows.iter().enumerate().skip(1) {
        if r.len() != expected {
            return Err(Malformed::RaggedRow { row, expected, found: r.len() }.into());
        }
    }
    Ok(())
}
