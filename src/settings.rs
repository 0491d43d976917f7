use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, Result};

pub const DB_FILE_NAME: &str = "expenses.db";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Optional JSON file overriding the built-in category list.
    #[serde(default)]
    pub categories_path: Option<String>,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> String {
    std::env::temp_dir()
        .join(DB_FILE_NAME)
        .to_string_lossy()
        .to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            categories_path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Settings {
    /// Resolve the store configuration, letting `db_override` (from `--db`) win.
    pub fn store_config(&self, db_override: Option<&str>) -> StoreConfig {
        let path = db_override.unwrap_or(&self.database_path);
        StoreConfig {
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            ..StoreConfig::new(shellexpand_path(path))
        }
    }

    pub fn categories_file(&self) -> Option<PathBuf> {
        self.categories_path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand_path(p)))
    }
}

/// Where the store lives and how long a connection waits on a locked database.
/// Every repository connection is opened from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            busy_timeout: Duration::from_millis(default_busy_timeout_ms()),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("expense-tracker")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ExpenseError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}
