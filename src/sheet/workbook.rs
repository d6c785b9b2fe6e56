// =============================================================================
// Workbook loading — calamine
// =============================================================================
//
// Two entry points into the same conversion: `load_workbook` reads an .xlsx
// file from disk (the preload path), `parse_workbook_bytes` interprets a
// fetched byte buffer (the client-refresh path). Both take the first
// worksheet only and convert every cell into the crate's own `Cell` type so
// nothing downstream depends on the spreadsheet library.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};
use tracing::info;

use crate::error::SourceError;
use crate::sheet::{Cell, TabularSource};

/// Load the first worksheet of the spreadsheet at `path`.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<TabularSource, SourceError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceError::NoSheet)??;

    let source = range_to_source(&range);
    info!(
        path = %path.display(),
        rows = source.rows.len(),
        "workbook loaded"
    );
    Ok(source)
}

/// Interpret an in-memory .xlsx byte buffer (as returned by the refresh
/// fetch) as a tabular source.
pub fn parse_workbook_bytes(bytes: &[u8]) -> Result<TabularSource, SourceError> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| SourceError::Unreadable(e.into()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceError::NoSheet)?
        .map_err(|e| SourceError::Unreadable(e.into()))?;

    Ok(range_to_source(&range))
}

fn range_to_source(range: &Range<Data>) -> TabularSource {
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    TabularSource::new(rows)
}

/// Convert one calamine cell into the crate's `Cell`.
///
/// Spreadsheet datetimes are rendered to ISO text here so the timestamp
/// column always reaches the normalizer as a parseable string, regardless of
/// whether the sheet stored it as text or a native date cell.
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::Text(naive.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_become_numbers() {
        assert_eq!(cell_from_data(&Data::Int(42)), Cell::Number(42.0));
        assert_eq!(cell_from_data(&Data::Float(104.5)), Cell::Number(104.5));
    }

    #[test]
    fn string_cells_become_text() {
        assert_eq!(
            cell_from_data(&Data::String("2024-03-13T09:15:00".into())),
            Cell::Text("2024-03-13T09:15:00".into())
        );
    }

    #[test]
    fn iso_datetime_cells_become_text() {
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2024-03-13T09:15:00".into())),
            Cell::Text("2024-03-13T09:15:00".into())
        );
    }

    #[test]
    fn bool_cells_become_zero_or_one() {
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Number(1.0));
        assert_eq!(cell_from_data(&Data::Bool(false)), Cell::Number(0.0));
    }

    #[test]
    fn empty_and_error_cells_become_empty() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(
            cell_from_data(&Data::Error(calamine::CellErrorType::Div0)),
            Cell::Empty
        );
    }

    #[test]
    fn garbage_bytes_are_unreadable() {
        let err = parse_workbook_bytes(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, SourceError::Unreadable(_)));
    }
}
