// =============================================================================
// Chart panel builders
// =============================================================================
//
// Mirrors the page layout this service feeds: a price panel (candlesticks +
// volume columns on an opposite axis), an RSI panel, and an EMA panel with
// three lines. All three panels share the same visible datetime window so
// their x-axes stay aligned.

use serde::Serialize;

use crate::normalize::ChartSeries;
use crate::render::style::{ChartTheme, SessionWindow};
use crate::types::{TimePoint, Trend};

// =============================================================================
// Output shapes (owned by the external charting library)
// =============================================================================

/// One plotted point. `y` is a scalar for line/column series and a 4-tuple
/// for candlesticks; `color` carries the bullish/bearish tag where the point
/// kind uses one.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: PointValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointValue {
    Scalar(f64),
    Ohlc([f64; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Candlestick,
    Column,
    Line,
}

/// A named series within a panel.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: Vec<ChartPoint>,
}

/// X-axis options: always a datetime axis clamped to the session window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxisOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub min: i64,
    pub max: i64,
}

impl XAxisOptions {
    fn datetime(window: &SessionWindow) -> Self {
        Self {
            kind: "datetime",
            min: window.start_ms,
            max: window.end_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub opposite: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOptions {
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_axis: XAxisOptions,
    pub y_axis: Vec<YAxisOptions>,
}

/// One complete chart panel: display options plus its series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPanel {
    pub options: PanelOptions,
    pub series: Vec<SeriesDef>,
}

/// The full page: price, RSI and EMA panels, top to bottom.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPage {
    pub price: ChartPanel,
    pub rsi: ChartPanel,
    pub ema: ChartPanel,
}

// =============================================================================
// Builders
// =============================================================================

const PRICE_PANEL_HEIGHT: u32 = 500;
const SUB_PANEL_HEIGHT: u32 = 200;

/// Build all three panels from one normalized series set.
pub fn build_page(series: &ChartSeries, theme: &ChartTheme, window: &SessionWindow) -> ChartPage {
    ChartPage {
        price: price_panel(series, theme, window),
        rsi: rsi_panel(series, theme, window),
        ema: ema_panel(series, window),
    }
}

/// Candlestick + volume panel. Both series carry the per-point
/// bullish/bearish color, recomputed from each bar's open and close.
pub fn price_panel(
    series: &ChartSeries,
    theme: &ChartTheme,
    window: &SessionWindow,
) -> ChartPanel {
    let candle_points: Vec<ChartPoint> = series
        .candlestick
        .iter()
        .map(|p| ChartPoint {
            x: p.timestamp,
            y: PointValue::Ohlc([p.value.open, p.value.high, p.value.low, p.value.close]),
            color: Some(trend_color(p.value.trend(), theme)),
        })
        .collect();

    // Volume bars reuse the candle classification of the same row; the tag is
    // not stored in the volume series itself.
    let volume_points: Vec<ChartPoint> = series
        .volume
        .iter()
        .zip(series.candlestick.iter())
        .map(|(vol, candle)| ChartPoint {
            x: vol.timestamp,
            y: PointValue::Scalar(vol.value),
            color: Some(trend_color(candle.value.trend(), theme)),
        })
        .collect();

    ChartPanel {
        options: PanelOptions {
            height: PRICE_PANEL_HEIGHT,
            title: Some("Candlestick Chart with Volume and RSI".to_string()),
            x_axis: XAxisOptions::datetime(window),
            y_axis: vec![
                YAxisOptions {
                    title: None,
                    label_color: Some(theme.bullish.clone()),
                    opposite: false,
                },
                YAxisOptions {
                    title: Some("Volume".to_string()),
                    label_color: Some(theme.bearish.clone()),
                    opposite: true,
                },
            ],
        },
        series: vec![
            SeriesDef {
                name: "Candlesticks".to_string(),
                kind: SeriesKind::Candlestick,
                data: candle_points,
            },
            SeriesDef {
                name: "Volume".to_string(),
                kind: SeriesKind::Column,
                data: volume_points,
            },
        ],
    }
}

/// RSI line panel.
pub fn rsi_panel(series: &ChartSeries, theme: &ChartTheme, window: &SessionWindow) -> ChartPanel {
    ChartPanel {
        options: PanelOptions {
            height: SUB_PANEL_HEIGHT,
            title: None,
            x_axis: XAxisOptions::datetime(window),
            y_axis: vec![YAxisOptions {
                title: Some("RSI".to_string()),
                label_color: Some(theme.rsi_line.clone()),
                opposite: false,
            }],
        },
        series: vec![SeriesDef {
            name: "RSI".to_string(),
            kind: SeriesKind::Line,
            data: scalar_points(&series.rsi),
        }],
    }
}

/// EMA panel with the three precomputed variants from the source columns.
pub fn ema_panel(series: &ChartSeries, window: &SessionWindow) -> ChartPanel {
    ChartPanel {
        options: PanelOptions {
            height: SUB_PANEL_HEIGHT,
            title: None,
            x_axis: XAxisOptions::datetime(window),
            y_axis: vec![YAxisOptions {
                title: Some("EMA".to_string()),
                label_color: None,
                opposite: false,
            }],
        },
        series: vec![
            SeriesDef {
                name: "EMA 4".to_string(),
                kind: SeriesKind::Line,
                data: scalar_points(&series.ema_fast),
            },
            SeriesDef {
                name: "EMA 9".to_string(),
                kind: SeriesKind::Line,
                data: scalar_points(&series.ema_mid),
            },
            SeriesDef {
                name: "EMA 12".to_string(),
                kind: SeriesKind::Line,
                data: scalar_points(&series.ema_slow),
            },
        ],
    }
}

fn scalar_points(points: &[TimePoint<f64>]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint {
            x: p.timestamp,
            y: PointValue::Scalar(p.value),
            color: None,
        })
        .collect()
}

fn trend_color(trend: Trend, theme: &ChartTheme) -> String {
    match trend {
        Trend::Bullish => theme.bullish.clone(),
        Trend::Bearish => theme.bearish.clone(),
    }
}
