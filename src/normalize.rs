// =============================================================================
// Tabular Time-Series Normalizer
// =============================================================================
//
// Converts a tabular source (header row + one row per trading interval) into
// six aligned time-indexed series for charting. Pure function of its input:
// no side effects beyond diagnostic logging, identical input yields identical
// output.
//
// Soft-failure policy: a malformed or short row is never dropped. It produces
// NaN values at its position in every series so that all six series always
// share one length and one timestamp sequence — a shared x-axis across
// multiple charts depends on that alignment. The structured row error is
// logged so bad data is visible without halting rendering.

use serde::Serialize;
use tracing::warn;

use crate::error::SourceError;
use crate::sheet::{Cell, SessionRow, TabularSource};
use crate::types::{parse_timestamp_ms, Ohlc, TimePoint};

/// The six aligned output series of the normalizer.
///
/// Invariant: all six vectors have the same length (one point per data row)
/// and identical timestamp sequences, in source row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub candlestick: Vec<TimePoint<Ohlc>>,
    pub volume: Vec<TimePoint<f64>>,
    pub rsi: Vec<TimePoint<f64>>,
    pub ema_fast: Vec<TimePoint<f64>>,
    pub ema_mid: Vec<TimePoint<f64>>,
    pub ema_slow: Vec<TimePoint<f64>>,
}

impl ChartSeries {
    /// Number of points, identical for every series.
    pub fn len(&self) -> usize {
        self.candlestick.len()
    }

    /// True when there are no data points at all. This is the guard the
    /// client-refresh path checks before scheduling a fetch.
    pub fn is_empty(&self) -> bool {
        self.candlestick.is_empty()
    }
}

/// Normalize a tabular source into six aligned series.
///
/// Row 0 is always treated as a header and skipped. Every subsequent row
/// contributes exactly one point to each series, degraded to NaN values when
/// the row fails the strict typed parse.
pub fn normalize(source: &TabularSource) -> ChartSeries {
    let len = source.data_len();
    let mut out = ChartSeries {
        candlestick: Vec::with_capacity(len),
        volume: Vec::with_capacity(len),
        rsi: Vec::with_capacity(len),
        ema_fast: Vec::with_capacity(len),
        ema_mid: Vec::with_capacity(len),
        ema_slow: Vec::with_capacity(len),
    };

    for (i, cells) in source.data_rows().enumerate() {
        let row = match SessionRow::parse(cells) {
            Ok(row) => row,
            Err(kind) => {
                // Sheet row index: +1 for the skipped header.
                let e = SourceError::MalformedRow { index: i + 1, kind };
                warn!(error = %e, "emitting degraded point");
                lenient_row(cells)
            }
        };

        let ts = row.timestamp_ms;
        out.candlestick.push(TimePoint::new(
            ts,
            Ohlc::new(row.open, row.high, row.low, row.close),
        ));
        out.volume.push(TimePoint::new(ts, row.volume));
        out.rsi.push(TimePoint::new(ts, row.rsi));
        out.ema_fast.push(TimePoint::new(ts, row.ema_fast));
        out.ema_mid.push(TimePoint::new(ts, row.ema_mid));
        out.ema_slow.push(TimePoint::new(ts, row.ema_slow));
    }

    out
}

/// Best-effort reading of a row that failed the strict parse: missing or
/// non-numeric cells become NaN, an unparseable timestamp becomes NaN.
fn lenient_row(cells: &[Cell]) -> SessionRow {
    let timestamp_ms = cells
        .first()
        .and_then(Cell::as_text)
        .map(parse_timestamp_ms)
        .unwrap_or(f64::NAN);

    SessionRow {
        timestamp_ms,
        open: cell_number(cells, 1),
        high: cell_number(cells, 2),
        low: cell_number(cells, 3),
        close: cell_number(cells, 4),
        ema_fast: cell_number(cells, 5),
        ema_mid: cell_number(cells, 6),
        ema_slow: cell_number(cells, 7),
        rsi: cell_number(cells, 8),
        volume: cell_number(cells, 9),
    }
}

fn cell_number(cells: &[Cell], index: usize) -> f64 {
    cells.get(index).map(Cell::as_number).unwrap_or(f64::NAN)
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn header() -> Vec<Cell> {
        ["t", "O", "H", "L", "C", "E4", "E9", "E12", "RSI", "Vol"]
            .iter()
            .map(|s| Cell::Text((*s).into()))
            .collect()
    }

    fn data_row(ts: &str, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Vec<Cell> {
        vec![
            Cell::Text(ts.into()),
            Cell::Number(open),
            Cell::Number(high),
            Cell::Number(low),
            Cell::Number(close),
            Cell::Number(101.0),
            Cell::Number(102.0),
            Cell::Number(103.0),
            Cell::Number(55.0),
            Cell::Number(volume),
        ]
    }

    fn sample_source(n: usize) -> TabularSource {
        let mut rows = vec![header()];
        for i in 0..n {
            let ts = format!("2024-03-13T09:{:02}:00", 15 + i);
            rows.push(data_row(&ts, 100.0, 105.0, 99.0, 104.0, 1000.0 + i as f64));
        }
        TabularSource::new(rows)
    }

    #[test]
    fn all_six_series_share_one_length() {
        let series = normalize(&sample_source(5));
        assert_eq!(series.len(), 5);
        assert_eq!(series.candlestick.len(), 5);
        assert_eq!(series.volume.len(), 5);
        assert_eq!(series.rsi.len(), 5);
        assert_eq!(series.ema_fast.len(), 5);
        assert_eq!(series.ema_mid.len(), 5);
        assert_eq!(series.ema_slow.len(), 5);
    }

    #[test]
    fn timestamps_follow_row_order_unsorted() {
        // Deliberately out of chronological order — the normalizer must not
        // reorder anything.
        let rows = vec![
            header(),
            data_row("2024-03-13T10:00:00", 100.0, 105.0, 99.0, 104.0, 1.0),
            data_row("2024-03-13T09:15:00", 100.0, 105.0, 99.0, 104.0, 2.0),
            data_row("2024-03-13T09:45:00", 100.0, 105.0, 99.0, 104.0, 3.0),
        ];
        let series = normalize(&TabularSource::new(rows));

        let ts: Vec<f64> = series.candlestick.iter().map(|p| p.timestamp).collect();
        assert_eq!(ts[0], parse_timestamp_ms("2024-03-13T10:00:00"));
        assert_eq!(ts[1], parse_timestamp_ms("2024-03-13T09:15:00"));
        assert_eq!(ts[2], parse_timestamp_ms("2024-03-13T09:45:00"));

        // Every series carries the identical timestamp sequence.
        for (a, b) in series.candlestick.iter().zip(series.volume.iter()) {
            assert_eq!(a.timestamp, b.timestamp);
        }
        for (a, b) in series.rsi.iter().zip(series.ema_slow.iter()) {
            assert_eq!(a.timestamp, b.timestamp);
        }
    }

    #[test]
    fn normalizing_twice_yields_identical_output() {
        let source = sample_source(4);
        assert_eq!(normalize(&source), normalize(&source));
    }

    #[test]
    fn single_bullish_row_scenario() {
        let rows = vec![
            header(),
            data_row("2024-03-13T09:15:00", 100.0, 105.0, 99.0, 104.0, 1000.0),
        ];
        let series = normalize(&TabularSource::new(rows));

        assert_eq!(series.len(), 1);
        let point = &series.candlestick[0];
        assert_eq!(point.timestamp, 1_710_321_300_000.0);
        assert_eq!(point.value, Ohlc::new(100.0, 105.0, 99.0, 104.0));
        assert_eq!(point.value.trend(), Trend::Bullish);

        assert_eq!(series.volume[0].value, 1000.0);
        assert_eq!(series.volume[0].timestamp, 1_710_321_300_000.0);
        assert_eq!(series.rsi[0].value, 55.0);
        assert_eq!(series.ema_fast[0].value, 101.0);
        assert_eq!(series.ema_mid[0].value, 102.0);
        assert_eq!(series.ema_slow[0].value, 103.0);
    }

    #[test]
    fn close_below_open_classifies_bearish() {
        let rows = vec![
            header(),
            data_row("2024-03-13T09:15:00", 100.0, 101.0, 94.0, 95.0, 500.0),
        ];
        let series = normalize(&TabularSource::new(rows));
        assert_eq!(series.candlestick[0].value.trend(), Trend::Bearish);
    }

    #[test]
    fn header_only_source_yields_empty_series() {
        let series = normalize(&TabularSource::new(vec![header()]));
        assert_eq!(series.len(), 0);
        assert!(series.is_empty());
        assert!(series.volume.is_empty());
        assert!(series.rsi.is_empty());
    }

    #[test]
    fn completely_empty_source_yields_empty_series() {
        let series = normalize(&TabularSource::default());
        assert!(series.is_empty());
    }

    #[test]
    fn short_row_degrades_to_nan_without_breaking_alignment() {
        let rows = vec![
            header(),
            data_row("2024-03-13T09:15:00", 100.0, 105.0, 99.0, 104.0, 1000.0),
            // Only timestamp + open: everything else is missing.
            vec![Cell::Text("2024-03-13T09:16:00".into()), Cell::Number(100.0)],
            data_row("2024-03-13T09:17:00", 100.0, 105.0, 99.0, 104.0, 1200.0),
        ];
        let series = normalize(&TabularSource::new(rows));

        // Alignment preserved: three points everywhere.
        assert_eq!(series.len(), 3);
        assert_eq!(series.volume.len(), 3);

        // Degraded row keeps its timestamp and whatever values it had.
        let degraded = &series.candlestick[1];
        assert_eq!(degraded.timestamp, parse_timestamp_ms("2024-03-13T09:16:00"));
        assert_eq!(degraded.value.open, 100.0);
        assert!(degraded.value.close.is_nan());
        assert!(series.volume[1].value.is_nan());
        assert!(series.rsi[1].value.is_nan());

        // Neighbours are untouched.
        assert_eq!(series.volume[2].value, 1200.0);
    }

    #[test]
    fn unparseable_timestamp_degrades_to_nan_timestamp() {
        let rows = vec![
            header(),
            data_row("soon", 100.0, 105.0, 99.0, 104.0, 1000.0),
        ];
        let series = normalize(&TabularSource::new(rows));
        assert_eq!(series.len(), 1);
        assert!(series.candlestick[0].timestamp.is_nan());
        // Value columns were fine and survive the degradation.
        assert_eq!(series.candlestick[0].value.open, 100.0);
        assert_eq!(series.volume[0].value, 1000.0);
    }
}
