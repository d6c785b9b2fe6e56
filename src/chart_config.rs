// =============================================================================
// Service Configuration
// =============================================================================
//
// All tunables for the charting service live in one JSON file. Every field
// carries a serde default so an older or partial config file keeps loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::render::{ChartTheme, SessionWindow};

fn default_sheet_path() -> String {
    "data1.xlsx".to_string()
}

fn default_refresh_url() -> String {
    "http://127.0.0.1:3001/data1.xlsx".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

/// Top-level configuration for the Candleboard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Local spreadsheet read by the preload path before the first render.
    #[serde(default = "default_sheet_path")]
    pub sheet_path: String,

    /// URL the one-shot client-refresh fetch retrieves the same spreadsheet
    /// from when the preload produced no data rows.
    #[serde(default = "default_refresh_url")]
    pub refresh_url: String,

    /// Address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Point and axis colors.
    #[serde(default)]
    pub theme: ChartTheme,

    /// Visible x-axis window shared by all panels.
    #[serde(default)]
    pub window: SessionWindow,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            sheet_path: default_sheet_path(),
            refresh_url: default_refresh_url(),
            bind_addr: default_bind_addr(),
            theme: ChartTheme::default(),
            window: SessionWindow::default(),
        }
    }
}

impl ChartConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// Returns an error when the file is missing or malformed so the caller
    /// can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read chart config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse chart config from {}", path.display()))?;

        info!(
            path = %path.display(),
            sheet = %config.sheet_path,
            bind = %config.bind_addr,
            "chart config loaded"
        );

        Ok(config)
    }
}
