// src/engine/types.rs

/// `<th>` vs `<td>`. The header resolver looks at this to decide where data starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Data,
}

/// One cell as authored in the markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub colspan: usize, // >= 1
    pub rowspan: usize, // >= 1
    pub kind: CellKind,
}

impl Cell {
    pub fn data(text: impl Into<String>) -> Self {
        Self { text: text.into(), colspan: 1, rowspan: 1, kind: CellKind::Data }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self { text: text.into(), colspan: 1, rowspan: 1, kind: CellKind::Header }
    }

    /// Builder-style span setter; zero is clamped to 1.
    pub fn span(mut self, colspan: usize, rowspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self.rowspan = rowspan.max(1);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(cells: Vec<Cell>) -> Self { Self { cells } }

    pub fn has_data_cells(&self) -> bool {
        self.cells.iter().any(|c| c.kind == CellKind::Data)
    }

    /// Sum of colspans, i.e. the width the row claims on its own.
    pub fn span_width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan).sum()
    }
}

/// The table as authored: one cell may stand for several grid positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub caption: Option<String>,
    pub rows: Vec<RawRow>,
}

/// Rectangular text grid. Only `engine::grid::normalize` builds one,
/// so every row has the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<String>>) -> Self { Self { rows } }

    pub fn rows(&self) -> &[Vec<String>] { &self.rows }
    pub fn into_rows(self) -> Vec<Vec<String>> { self.rows }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn len(&self) -> usize { self.rows.len() }

    /// Column count; `None` for a grid with no rows.
    pub fn width(&self) -> Option<usize> {
        self.rows.first().map(Vec::len)
    }

    /// True when every row is exactly `width` wide.
    pub fn fits(&self, width: usize) -> bool {
        self.rows.iter().all(|r| r.len() == width)
    }
}

/// Column labels, or positional placeholders when the real ones are unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderSet {
    Labels(Vec<String>),
    Positional(usize),
}

impl HeaderSet {
    pub fn width(&self) -> usize {
        match self {
            HeaderSet::Labels(l) => l.len(),
            HeaderSet::Positional(w) => *w,
        }
    }

    /// Header cells as written to the export (`0`, `1`, … for placeholders).
    pub fn to_labels(&self) -> Vec<String> {
        match self {
            HeaderSet::Labels(l) => l.clone(),
            HeaderSet::Positional(w) => (0..*w).map(|i| i.to_string()).collect(),
        }
    }
}
