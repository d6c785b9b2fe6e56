// =============================================================================
// Chart styling values
// =============================================================================

use serde::{Deserialize, Serialize};

/// 2024-03-13T09:15:00Z.
const DEFAULT_SESSION_START_MS: i64 = 1_710_321_300_000;
/// 2024-03-13T13:03:00Z.
const DEFAULT_SESSION_END_MS: i64 = 1_710_334_980_000;

fn default_bullish() -> String {
    "#4caf50".to_string()
}

fn default_bearish() -> String {
    "#f44336".to_string()
}

fn default_rsi_line() -> String {
    "#2196f3".to_string()
}

/// Colors applied to chart points and axis labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartTheme {
    /// Color for bullish candles and their volume bars.
    #[serde(default = "default_bullish")]
    pub bullish: String,

    /// Color for bearish candles and their volume bars.
    #[serde(default = "default_bearish")]
    pub bearish: String,

    /// Color for the RSI line and its axis labels.
    #[serde(default = "default_rsi_line")]
    pub rsi_line: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            bullish: default_bullish(),
            bearish: default_bearish(),
            rsi_line: default_rsi_line(),
        }
    }
}

/// The visible x-axis window shared by all panels, in epoch milliseconds.
///
/// The default spans a single trading session (2024-03-13 09:15–13:03 UTC),
/// carried over from the data set this tool was built around. Any other
/// window can be configured; nothing else in the pipeline assumes this range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    #[serde(default = "SessionWindow::default_start_ms")]
    pub start_ms: i64,

    #[serde(default = "SessionWindow::default_end_ms")]
    pub end_ms: i64,
}

impl SessionWindow {
    fn default_start_ms() -> i64 {
        DEFAULT_SESSION_START_MS
    }

    fn default_end_ms() -> i64 {
        DEFAULT_SESSION_END_MS
    }
}

impl Default for SessionWindow {
    fn default() -> Self {
        Self {
            start_ms: DEFAULT_SESSION_START_MS,
            end_ms: DEFAULT_SESSION_END_MS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp_ms;

    #[test]
    fn default_window_matches_the_session_literals() {
        let window = SessionWindow::default();
        assert_eq!(
            window.start_ms as f64,
            parse_timestamp_ms("2024-03-13T09:15:00")
        );
        assert_eq!(
            window.end_ms as f64,
            parse_timestamp_ms("2024-03-13T13:03:00")
        );
    }

    #[test]
    fn default_theme_colors() {
        let theme = ChartTheme::default();
        assert_eq!(theme.bullish, "#4caf50");
        assert_eq!(theme.bearish, "#f44336");
        assert_eq!(theme.rsi_line, "#2196f3");
    }

    #[test]
    fn theme_deserialises_with_partial_fields() {
        let theme: ChartTheme = serde_json::from_str(r##"{ "bullish": "#00ff00" }"##).unwrap();
        assert_eq!(theme.bullish, "#00ff00");
        assert_eq!(theme.bearish, "#f44336");
    }

    #[test]
    fn window_deserialises_with_defaults() {
        let window: SessionWindow = serde_json::from_str("{}").unwrap();
        assert_eq!(window, SessionWindow::default());
    }
}
