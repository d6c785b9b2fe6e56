// =============================================================================
// Typed session row
// =============================================================================
//
// The source sheet addresses rows by numeric position with no schema. This is
// the single explicit parse step that turns one positional row into named
// fields, validating column count and types up front. The normalizer uses it
// for diagnostics and falls back to degraded NaN points when it fails; other
// callers get a structured `RowError` instead of silent NaN.

use crate::error::RowError;
use crate::sheet::Cell;
use crate::types::parse_timestamp_ms;

/// Column names in fixed positional order.
const COLUMN_NAMES: [&str; 10] = [
    "timestamp", "open", "high", "low", "close", "ema_fast", "ema_mid", "ema_slow", "rsi",
    "volume",
];

/// One trading interval, parsed from a positional spreadsheet row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionRow {
    /// Epoch milliseconds.
    pub timestamp_ms: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub ema_fast: f64,
    pub ema_mid: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub volume: f64,
}

impl SessionRow {
    /// Number of columns the fixed layout requires.
    pub const COLUMNS: usize = 10;

    /// Strictly parse a positional row.
    ///
    /// # Errors
    /// - [`RowError::TooShort`] when fewer than [`Self::COLUMNS`] cells exist.
    /// - [`RowError::BadTimestamp`] when column 0 does not parse as a datetime.
    /// - [`RowError::BadNumber`] when a value column is not a finite number.
    pub fn parse(cells: &[Cell]) -> Result<Self, RowError> {
        if cells.len() < Self::COLUMNS {
            return Err(RowError::TooShort {
                expected: Self::COLUMNS,
                found: cells.len(),
            });
        }

        let raw_ts = cells[0].as_text().unwrap_or("");
        let timestamp_ms = parse_timestamp_ms(raw_ts);
        if !timestamp_ms.is_finite() {
            return Err(RowError::BadTimestamp(raw_ts.to_string()));
        }

        let mut values = [0.0_f64; 9];
        for (i, slot) in values.iter_mut().enumerate() {
            let column = i + 1;
            let v = cells[column].as_number();
            if !v.is_finite() {
                return Err(RowError::BadNumber {
                    column,
                    name: COLUMN_NAMES[column],
                });
            }
            *slot = v;
        }

        Ok(Self {
            timestamp_ms,
            open: values[0],
            high: values[1],
            low: values[2],
            close: values[3],
            ema_fast: values[4],
            ema_mid: values[5],
            ema_slow: values[6],
            rsi: values[7],
            volume: values[8],
        })
    }
}
