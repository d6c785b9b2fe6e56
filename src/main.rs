// =============================================================================
// Candleboard — Main Entry Point
// =============================================================================
//
// Startup order matters: the preload path reads and normalizes the local
// spreadsheet synchronously before anything is served, and a failure there is
// fatal — there is no recovery path for a broken preload. Only when the
// preload yields zero data rows is the one-shot client-refresh fetch
// scheduled.
// =============================================================================

mod api;
mod app_state;
mod chart_config;
mod error;
mod normalize;
mod refresh;
mod render;
mod sheet;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::chart_config::ChartConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Candleboard starting up");

    let mut config = ChartConfig::load("chart_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        ChartConfig::default()
    });

    if let Ok(path) = std::env::var("CANDLEBOARD_SHEET") {
        config.sheet_path = path;
    }
    if let Ok(addr) = std::env::var("CANDLEBOARD_BIND_ADDR") {
        config.bind_addr = addr;
    }

    // ── 2. Preload path (fatal on failure) ───────────────────────────────
    let source = sheet::load_workbook(&config.sheet_path)
        .with_context(|| format!("preload failed for {}", config.sheet_path))?;
    let series = normalize::normalize(&source);
    info!(
        points = series.len(),
        sheet = %config.sheet_path,
        "preload complete"
    );

    let state = Arc::new(AppState::new(config, series));

    // ── 3. API server ────────────────────────────────────────────────────
    let api_state = state.clone();
    let bind_addr = state.config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, api::rest::router(api_state)).await {
            tracing::error!(error = %e, "API server failed");
        }
    });

    // ── 4. Guarded client-refresh path ───────────────────────────────────
    // Scheduled only when the preload produced an empty series set.
    let refresh_handle = if refresh::needs_refresh(&state.series.read()) {
        Some(refresh::spawn_refresh(state.clone()))
    } else {
        None
    };

    info!("Serving. Press Ctrl+C to stop.");

    // ── 5. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("shutdown signal received");

    if let Some(handle) = refresh_handle {
        handle.abort();
    }

    info!("Candleboard shut down complete.");
    Ok(())
}
