// src/core/html.rs
//! Table locating on rendered page HTML.
//!
//! Tables are matched by class token (any of the configured classes) and
//! picked by 1-based ordinal in document order. Only rows that belong to the
//! table itself are read; a nested table's rows stay out.

use log::debug;
use scraper::{ElementRef, Html};

use super::sanitize::normalize_ws;
use crate::config::options::TableSelector;
use crate::engine::types::{Cell, CellKind, RawRow, RawTable};
use crate::error::{Error, Result};

// HTML caps for span attributes
pub const MAX_COLSPAN: usize = 1000;
pub const MAX_ROWSPAN: usize = 65534;

/// One line of `--list` output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    pub ordinal: usize,
    pub caption: Option<String>,
    pub classes: Vec<String>,
    pub rows: usize,
    pub width: usize, // widest raw row, colspans counted
}

/// Parse `html` and return the table chosen by `select`.
pub fn locate_table(html: &str, select: &TableSelector) -> Result<RawTable> {
    if select.ordinal == 0 {
        return Err(Error::InvalidArgument(s!("table ordinal is 1-based")));
    }
    let doc = Html::parse_document(html);
    let tables = matching_tables(&doc, &select.classes);
    debug!("{} tables match {:?}", tables.len(), select.classes);

    let table = tables
        .get(select.ordinal - 1)
        .ok_or(Error::NotFound { ordinal: select.ordinal, found: tables.len() })?;
    Ok(read_table(*table, select.strip_references))
}

/// Summaries of every matching table, in document order.
pub fn list_tables(html: &str, select: &TableSelector) -> Vec<TableSummary> {
    let doc = Html::parse_document(html);
    matching_tables(&doc, &select.classes)
        .into_iter()
        .enumerate()
        .map(|(i, el)| {
            let raw = read_table(el, select.strip_references);
            TableSummary {
                ordinal: i + 1,
                caption: raw.caption,
                classes: el
                    .value()
                    .attr("class")
                    .unwrap_or_default()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
                rows: raw.rows.len(),
                width: raw.rows.iter().map(RawRow::span_width).max().unwrap_or(0),
            }
        })
        .collect()
}

/// `<table>` elements carrying any of `classes`; everything when `classes` is empty.
fn matching_tables<'a>(doc: &'a Html, classes: &[String]) -> Vec<ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "table")
        .filter(|el| {
            classes.is_empty() || el.value().classes().any(|c| classes.iter().any(|want| want == c))
        })
        .collect()
}

fn read_table(table: ElementRef<'_>, strip_refs: bool) -> RawTable {
    let mut caption = None;
    let mut rows = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "caption" => caption = Some(cell_text(child, strip_refs)).filter(|t| !t.is_empty()),
            "tr" => rows.push(read_row(child, strip_refs)),
            "thead" | "tbody" | "tfoot" => {
                for tr in child.children().filter_map(ElementRef::wrap) {
                    if tr.value().name() == "tr" {
                        rows.push(read_row(tr, strip_refs));
                    }
                }
            }
            _ => {}
        }
    }

    RawTable { caption, rows }
}

fn read_row(tr: ElementRef<'_>, strip_refs: bool) -> RawRow {
    let cells = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter_map(|el| {
            let kind = match el.value().name() {
                "th" => CellKind::Header,
                "td" => CellKind::Data,
                _ => return None,
            };
            Some(Cell {
                text: cell_text(el, strip_refs),
                colspan: span_attr(el, "colspan", MAX_COLSPAN),
                rowspan: span_attr(el, "rowspan", MAX_ROWSPAN),
                kind,
            })
        })
        .collect();
    RawRow::new(cells)
}

/// Visible text of an element, trimmed.
/// With `strip_refs`, footnote markers and `display:none` sort keys are skipped
/// and the whitespace runs they leave behind are collapsed.
fn cell_text(el: ElementRef<'_>, strip_refs: bool) -> String {
    let mut out = s!();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else { continue };
        if strip_refs {
            let skipped = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take_while(|a| a.id() != el.id())
                .any(is_skippable);
            if skipped {
                continue;
            }
        }
        out.push_str(text);
    }
    if strip_refs { normalize_ws(&out) } else { out.trim().to_string() }
}

fn is_skippable(el: ElementRef<'_>) -> bool {
    let v = el.value();
    if v.name() == "sup" && v.classes().any(|c| c == "reference") {
        return true;
    }
    v.attr("style").is_some_and(|style| {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        compact.contains("display:none")
    })
}

/// Leading digits of the attribute; missing, junk or zero means 1.
/// `rowspan="0"` (span to the end of the row group) is not honoured: it reads
/// as 1, so a table relying on it comes out ragged.
fn span_attr(el: ElementRef<'_>, name: &str, max: usize) -> usize {
    el.value()
        .attr(name)
        .and_then(leading_number)
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(max))
}

fn leading_number(s: &str) -> Option<usize> {
    let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
