//! Configuration module for MagnetSearch-RS
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::info;

/// Global settings instance
static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Initialize global settings
pub fn init(settings: Settings) -> Result<&'static Settings> {
    SETTINGS
        .set(settings)
        .map_err(|_| anyhow::anyhow!("Settings already initialized"))?;
    SETTINGS
        .get()
        .ok_or_else(|| anyhow::anyhow!("Settings not initialized"))
}

/// Load settings from the first settings file found, or use defaults.
///
/// `MAGNETSEARCH_SETTINGS_PATH` takes precedence over the default locations.
/// Environment overrides are applied in every case, then the result is
/// validated.
pub fn load() -> Result<Settings> {
    let mut candidates = Vec::new();
    if let Ok(path) = std::env::var("MAGNETSEARCH_SETTINGS_PATH") {
        candidates.push(PathBuf::from(path));
    }
    candidates.extend(default_paths());

    let mut settings = match candidates.iter().find(|p| p.exists()) {
        Some(path) => load_from(path)?,
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn load_from(path: &Path) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    Settings::from_file(path)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/magnetsearch/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("magnetsearch-rs/settings.yml"));
    }
    paths
}
