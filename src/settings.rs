//! User settings stored as settings.json in the app data directory

use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub api_base_url: String,
    pub request_timeout_secs: u64,

    // Paths
    pub last_open_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 120,
            last_open_dir: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        let mut settings = match std::fs::read_to_string(&path) {
            Ok(s) => Self::parse(&s),
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            info!(url = %url, "API base URL overridden from environment");
            settings.api_base_url = url;
        }
        settings
    }

    fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(settings) => {
                debug!("Settings loaded");
                settings
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn open_dir_or_default(&self) -> PathBuf {
        self.last_open_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")))
    }
}
