// =============================================================================
// Tabular source model
// =============================================================================
//
// The spreadsheet boundary is collapsed into two small types: `Cell`, a
// heterogeneous cell value detached from the spreadsheet library, and
// `TabularSource`, the ordered grid of rows. Row 0 is always a header; the
// column layout is fixed and positional (no header-name lookup).

pub mod row;
pub mod workbook;

pub use row::SessionRow;
pub use workbook::{load_workbook, parse_workbook_bytes};

/// A single spreadsheet cell, reduced to what the normalizer needs.
///
/// Spreadsheet date cells are rendered to ISO text at the workbook boundary
/// so timestamp parsing happens in exactly one place.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Coerce this cell to a number, soft-failure style.
    ///
    /// - `Number` passes through.
    /// - `Text` is parsed; unparseable text yields NaN.
    /// - `Empty` yields NaN (a short or blank row degrades, it never rejects).
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            Self::Empty => f64::NAN,
        }
    }

    /// The cell's textual content, if it has any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Ordered sequence of spreadsheet rows; row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularSource {
    pub rows: Vec<Vec<Cell>>,
}

impl TabularSource {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Data rows in order, skipping the header row. An empty or header-only
    /// source yields an empty iterator.
    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    /// Number of data rows (rows beyond the header).
    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}
