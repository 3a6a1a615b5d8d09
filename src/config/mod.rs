// ABOUTME: Configuration management for freightbook
// Backend endpoint, broker timezone offset, request timeout, and UI preferences

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configured backend base URL.
pub const BACKEND_URL_ENV: &str = "FREIGHTBOOK_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the scheduling backend. Misconfiguration is a deployment
    /// concern; requests against a wrong URL surface as fetch errors.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Whole-hour UTC offset the slot catalog is interpreted in. The
    /// brokerage operates on Arabia Standard Time.
    #[serde(default = "default_broker_offset")]
    pub broker_utc_offset_hours: i32,

    /// Per-request timeout for the scheduling backend.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Color theme
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Whether slot lists also show the broker-local label next to the
    /// viewer-local one.
    #[serde(default = "default_true")]
    pub show_broker_time: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_broker_time: default_true(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_broker_offset() -> i32 {
    3
}

fn default_request_timeout() -> u64 {
    30
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from default locations, later files taking
    /// precedence, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        for path in Self::config_paths() {
            if path.exists() {
                config = Self::load_from(&path)?;
            }
        }

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend_url = url;
            }
        }

        Ok(config)
    }

    /// Load configuration from a single file.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save configuration to the user config directory.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::user_config_dir()?;
        fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    /// Configuration file paths in order of increasing precedence.
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/freightbook/config.toml")];

        if let Ok(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".freightbook").join("config.toml"));
        }

        paths
    }

    fn user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".freightbook"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            broker_utc_offset_hours: default_broker_offset(),
            request_timeout_secs: default_request_timeout(),
            ui_preferences: UiPreferences::default(),
        }
    }
}
