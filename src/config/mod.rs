use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::app::Page;

fn default_currency() -> String {
    "MAD".to_string()
}

fn default_recent_orders_limit() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Currency label printed after every price
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Screen shown on launch
    #[serde(default)]
    pub start_page: Page,

    /// Rows in the dashboard's recent orders table
    #[serde(default = "default_recent_orders_limit")]
    pub recent_orders_limit: usize,

    /// Mirror alerts as desktop notifications
    #[serde(default)]
    pub notifications: bool,

    /// Where CSV exports are written (defaults to the download dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// JSON dataset to load instead of the built-in sample data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Colour overrides, e.g. `accent = "#FF6B35"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub theme: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            start_page: Page::default(),
            recent_orders_limit: default_recent_orders_limit(),
            notifications: false,
            export_dir: None,
            data_file: None,
            theme: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("omeal-admin");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    /// Read `path`; a missing file is created with defaults
    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // Leave a broken file alone so the user can fix it
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Save config to file
    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join("omeal-admin"))
    }
}
