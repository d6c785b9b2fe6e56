// =============================================================================
// Shared application state
// =============================================================================
//
// One source of truth for the served series. The preload path writes it once
// at startup; the guarded refresh task may replace it once more. Handlers
// only ever read.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock around the series set.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::chart_config::ChartConfig;
use crate::normalize::ChartSeries;

/// State shared across the API handlers and the refresh task via `Arc`.
pub struct AppState {
    /// Monotonically increasing version, bumped whenever the series change.
    pub state_version: AtomicU64,

    /// Immutable service configuration.
    pub config: ChartConfig,

    /// The currently served normalized series.
    pub series: RwLock<ChartSeries>,

    /// Instant the service started, for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wrap the preloaded series and configuration into shared state.
    pub fn new(config: ChartConfig, series: ChartSeries) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            config,
            series: RwLock::new(series),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    /// Swap in a freshly normalized series set and bump the version.
    pub fn replace_series(&self, series: ChartSeries) {
        *self.series.write() = series;
        self.state_version.fetch_add(1, Ordering::SeqCst);
    }
}
