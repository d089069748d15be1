//! Persisted export settings at ~/.config/courseics/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use courseics_core::ExportConfig;

/// Get the config directory path (~/.config/courseics)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("courseics");
    Ok(config_dir)
}

/// Get the settings file path (~/.config/courseics/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load settings, falling back to defaults when no file exists yet.
pub fn load() -> Result<ExportConfig> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<ExportConfig> {
    if !path.exists() {
        return Ok(ExportConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn save(config: &ExportConfig) -> Result<()> {
    save_to(config, &config_path()?)
}

pub fn save_to(config: &ExportConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize settings")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Could not write {}", path.display()))?;

    Ok(())
}
