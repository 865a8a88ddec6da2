use crate::{error::Result, NoteError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Page size sent with list/search; `None` leaves it to the server.
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            page_size: None,
            cache_enabled: default_cache_enabled(),
            database_path: None,
        }
    }
}

impl Config {
    /// Location of the local note cache.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let mut path = dirs::data_dir()
            .ok_or_else(|| NoteError::Config("Failed to get data directory".to_string()))?;
        path.push("simplenote");
        fs::create_dir_all(&path)?;
        path.push("simplenote.db");
        Ok(path)
    }

    /// Fixes values that would make the client unusable. Returns true if anything changed.
    fn normalize(&mut self) -> bool {
        let mut changed = false;

        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let base_url = if trimmed.is_empty() {
            default_base_url()
        } else {
            trimmed
        };
        if base_url != self.base_url {
            self.base_url = base_url;
            changed = true;
        }

        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
            changed = true;
        }

        if self.page_size == Some(0) {
            self.page_size = None;
            changed = true;
        }

        changed
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .ok_or_else(|| NoteError::Config("Failed to get config directory".to_string()))?;

    path.push("simplenote");
    fs::create_dir_all(&path)?;

    path.push("config.json");
    Ok(path)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

/// Loads the config at `path`, writing defaults if the file does not exist yet.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let default_config = Config::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| NoteError::Config(format!("Failed to parse config: {}", e)))?;
    let mut config: Config = serde_json::from_value(value.clone())
        .map_err(|e| NoteError::Config(format!("Failed to parse config: {}", e)))?;

    let changed = config.normalize();

    // Backfill keys added since the file was written.
    let needs_backfill = value
        .as_object()
        .map(|obj| !obj.contains_key("cache_enabled") || !obj.contains_key("request_timeout_secs"))
        .unwrap_or(false);
    if needs_backfill || changed {
        save_config_to(path, &config)?;
    }

    Ok(config)
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&get_config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| NoteError::Internal(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, content)?;

    Ok(())
}
