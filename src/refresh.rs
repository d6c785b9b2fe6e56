// =============================================================================
// Client-refresh path — guarded one-shot fetch
// =============================================================================
//
// Runs only when the preload produced no data rows. Fetches the spreadsheet
// bytes once, parses and normalizes them, and swaps the result into shared
// state. No retry, no timeout beyond the HTTP client's own, no concurrency
// with any other operation. Failure is logged and the service keeps serving
// the empty series.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app_state::AppState;
use crate::error::SourceError;
use crate::normalize::{normalize, ChartSeries};
use crate::sheet::{self, TabularSource};

/// HTTP timeout for the one-shot fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Precondition for scheduling a refresh: the preload returned no data rows.
/// A non-empty preload must never trigger a fetch.
pub fn needs_refresh(series: &ChartSeries) -> bool {
    series.is_empty()
}

/// Fetch the spreadsheet from `url` and parse it into a tabular source.
pub async fn fetch_source(client: &reqwest::Client, url: &str) -> Result<TabularSource, SourceError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    sheet::parse_workbook_bytes(&bytes)
}

/// Spawn the one-shot refresh task. The returned handle can be used to
/// cancel the fetch; dropping it detaches the task.
pub fn spawn_refresh(state: Arc<AppState>) -> JoinHandle<()> {
    let url = state.config.refresh_url.clone();

    tokio::spawn(async move {
        info!(url = %url, "preload was empty, fetching spreadsheet");

        let client = match reqwest::Client::builder().timeout(FETCH_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "failed to build refresh HTTP client");
                return;
            }
        };

        match fetch_source(&client, &url).await {
            Ok(source) => {
                let series = normalize(&source);
                info!(points = series.len(), "refresh fetch complete, series replaced");
                state.replace_series(series);
            }
            Err(e) => {
                // Soft failure: log and keep serving whatever we have.
                error!(error = %e, "refresh fetch failed, series left unchanged");
            }
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;
    use crate::types::{Ohlc, TimePoint};

    #[test]
    fn empty_series_need_a_refresh() {
        assert!(needs_refresh(&ChartSeries::default()));
    }

    #[test]
    fn header_only_normalization_needs_a_refresh() {
        let source = TabularSource::new(vec![vec![Cell::Text("t".into())]]);
        assert!(needs_refresh(&normalize(&source)));
    }

    #[test]
    fn non_empty_series_must_not_refresh() {
        let mut series = ChartSeries::default();
        series
            .candlestick
            .push(TimePoint::new(0.0, Ohlc::new(1.0, 2.0, 0.5, 1.5)));
        assert!(!needs_refresh(&series));
    }

    #[tokio::test]
    async fn fetch_from_unreachable_host_is_a_network_error() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(250))
            .build()
            .unwrap();
        // Reserved TEST-NET-1 address; nothing listens there.
        let err = fetch_source(&client, "http://192.0.2.1:9/data1.xlsx")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }
}
