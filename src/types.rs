// =============================================================================
// Shared types used across the Candleboard charting service
// =============================================================================

use serde::{Deserialize, Serialize};

/// Per-interval bullish/bearish classification.
///
/// A bar is bullish when `close >= open` — equality counts as bullish. This is
/// the only business rule beyond data reshaping and its tie-break direction
/// must not change: it drives color selection for candlestick and volume
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    /// Classify a bar from its open and close prices.
    ///
    /// Non-finite inputs never satisfy `close >= open`, so a bar with a NaN
    /// open or close classifies as bearish.
    pub fn from_prices(open: f64, close: f64) -> Self {
        if close >= open {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
        }
    }
}

/// One open/high/low/close tuple for a candlestick point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Bullish/bearish classification of this bar. Consumers recompute this
    /// on demand rather than storing it as a seventh series.
    pub fn trend(&self) -> Trend {
        Trend::from_prices(self.open, self.close)
    }
}

/// A single time-indexed value in a series.
///
/// `timestamp` is epoch milliseconds as `f64` so that an unparseable source
/// timestamp can be represented as NaN without dropping the point (the
/// normalizer never rejects a row, it degrades it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint<V> {
    pub timestamp: f64,
    pub value: V,
}

impl<V> TimePoint<V> {
    pub fn new(timestamp: f64, value: V) -> Self {
        Self { timestamp, value }
    }
}

/// Parse a datetime string from the timestamp column into epoch milliseconds.
///
/// Accepted formats, tried in order:
/// - ISO 8601 with offset (`2024-03-13T09:15:00+05:30`)
/// - `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds (naive, read as UTC)
/// - `YYYY-MM-DD HH:MM:SS` with optional fractional seconds (naive, read as UTC)
///
/// Returns NaN when nothing matches. The original page relied on the host's
/// locale date parser and silently produced an invalid timestamp on failure;
/// NaN preserves that soft-failure behavior with a fixed format set.
pub fn parse_timestamp_ms(s: &str) -> f64 {
    let s = s.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_millis() as f64;
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_utc().timestamp_millis() as f64;
        }
    }

    f64::NAN
}
