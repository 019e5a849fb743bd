use super::store::DEFAULT_STORAGE_KEY;
use crate::domain::Projection;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User settings stored in config.json inside the data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Blob key the task collection is saved under
    pub storage_key: String,
    /// Projection shown on startup
    pub start_view: Projection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            start_view: Projection::List,
        }
    }
}

pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Load config.json; a missing file yields defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    let Some(content) = super::files::read_file(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?
    else {
        return Ok(AppConfig::default());
    };

    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    validate_storage_key(&config.storage_key)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// The key becomes a file name inside the data directory, so it must stay a single path component
fn validate_storage_key(key: &str) -> Result<()> {
    let has_separator = key.contains(|c: char| c == '/' || c == '\\');
    if key.trim().is_empty() || key == "." || key == ".." || has_separator {
        bail!("storage_key '{}' must be a plain name without path separators", key);
    }
    Ok(())
}

/// Save config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config)?;
    super::files::atomic_write(path, &json)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
