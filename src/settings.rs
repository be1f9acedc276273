//! Application settings
//!
//! Settings are stored as JSON. Every field has a default, so a partial file
//! (or no file at all) is valid. A few fields can be overridden from the
//! environment.

use crate::constants::{DEFAULT_CHART_TITLE, DEFAULT_HOST, DEFAULT_PORT, MAX_UPLOAD_MB, PREVIEW_ROWS};
use crate::types::{ChartConfig, ColorScheme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = "autoviz";
const SETTINGS_FILE: &str = "settings.json";

pub const ENV_MAX_UPLOAD_MB: &str = "AUTOVIZ_MAX_UPLOAD_MB";
pub const ENV_HOST: &str = "AUTOVIZ_HOST";
pub const ENV_PORT: &str = "AUTOVIZ_PORT";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Largest accepted upload, in MB
    pub max_upload_mb: u64,
    /// Rows returned in the upload preview
    pub preview_rows: usize,
    pub host: String,
    pub port: u16,
    /// Title used when a chart request leaves it blank
    pub default_title: String,
    pub default_color_scheme: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_upload_mb: MAX_UPLOAD_MB,
            preview_rows: PREVIEW_ROWS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_title: DEFAULT_CHART_TITLE.to_string(),
            default_color_scheme: ColorScheme::Default,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save settings as pretty JSON, creating the parent directory if needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file {:?}", path))
    }

    /// Apply `AUTOVIZ_*` overrides. Unparseable values are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_UPLOAD_MB) {
            match value.trim().parse() {
                Ok(mb) => self.max_upload_mb = mb,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_MAX_UPLOAD_MB, value),
            }
        }
        if let Some(value) = lookup(ENV_HOST) {
            if value.trim().is_empty() {
                tracing::warn!("Ignoring empty {}", ENV_HOST);
            } else {
                self.host = value.trim().to_string();
            }
        }
        if let Some(value) = lookup(ENV_PORT) {
            match value.trim().parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a port", ENV_PORT, value),
            }
        }
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(mut self) -> Self {
        self.apply_env_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Upload ceiling in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// A chart request carrying the configured defaults
    pub fn default_chart_config(&self) -> ChartConfig {
        ChartConfig::default()
            .with_title(self.default_title.clone())
            .with_color_scheme(self.default_color_scheme.clone())
    }
}

/// `<config dir>/autoviz/settings.json`, if the platform has a config dir
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}
