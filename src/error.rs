// =============================================================================
// Error taxonomy
// =============================================================================
//
// The original page swallowed every failure behind one catch-all log line.
// Distinct kinds are defined here so callers and tests can tell an unreadable
// workbook from a bad network fetch from a structurally broken row, even
// though the serving path still degrades softly (empty or NaN series instead
// of a hard error).

use thiserror::Error;

/// Structural problem with a single data row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// Row has fewer cells than the fixed positional layout requires.
    #[error("expected at least {expected} columns, found {found}")]
    TooShort { expected: usize, found: usize },

    /// The timestamp column did not parse as a datetime string.
    #[error("unparseable timestamp {0:?}")]
    BadTimestamp(String),

    /// A numeric column did not coerce to a finite number.
    #[error("column {column} ({name}) is not a finite number")]
    BadNumber { column: usize, name: &'static str },
}

/// Failure to acquire or interpret a tabular source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The spreadsheet file or buffer could not be opened or parsed.
    #[error("unreadable spreadsheet source: {0}")]
    Unreadable(#[from] calamine::Error),

    /// The workbook contains no worksheets.
    #[error("workbook contains no worksheets")]
    NoSheet,

    /// The refresh fetch failed at the network boundary.
    #[error("network fetch failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A data row failed the strict typed parse. Carried for diagnostics;
    /// the normalizer logs this and emits a degraded point instead of
    /// propagating it.
    #[error("malformed row {index}: {kind}")]
    MalformedRow { index: usize, kind: RowError },
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_error_messages_name_the_problem() {
        let e = RowError::TooShort {
            expected: 10,
            found: 3,
        };
        assert_eq!(e.to_string(), "expected at least 10 columns, found 3");

        let e = RowError::BadTimestamp("banana".into());
        assert!(e.to_string().contains("banana"));

        let e = RowError::BadNumber {
            column: 4,
            name: "close",
        };
        assert!(e.to_string().contains("close"));
    }

    #[test]
    fn malformed_row_carries_index_and_kind() {
        let e = SourceError::MalformedRow {
            index: 7,
            kind: RowError::TooShort {
                expected: 10,
                found: 2,
            },
        };
        let msg = e.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("found 2"));
    }
}
