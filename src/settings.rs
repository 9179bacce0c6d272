use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SalesError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_demo_seed")]
    pub demo_seed: u64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_fallback")]
    pub fallback_to_demo: bool,
}

fn default_data_file() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("dealerboard")
        .join("sales.json")
        .to_string_lossy()
        .to_string()
}

fn default_demo_seed() -> u64 {
    42
}

fn default_top_n() -> usize {
    10
}

fn default_fallback() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            demo_seed: default_demo_seed(),
            top_n: default_top_n(),
            fallback_to_demo: default_fallback(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dealerboard")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SalesError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
