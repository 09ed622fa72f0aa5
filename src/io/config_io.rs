use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("no data directory: set --dir, MACROCOPY_DIR or HOME")]
    NoDataDir,
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read `config.toml` from the data directory. A missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };
    Ok(toml::from_str(&text)?)
}

/// Resolve the data directory: the explicit flag, then `MACROCOPY_DIR`,
/// then `$XDG_DATA_HOME/macrocopy`, then `~/.local/share/macrocopy`.
pub fn resolve_data_dir(flag: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(dir));
    }
    data_dir_from(
        std::env::var("MACROCOPY_DIR").ok(),
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn data_dir_from(
    explicit: Option<String>,
    xdg_data_home: Option<String>,
    home: Option<String>,
) -> Result<PathBuf, ConfigError> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    if let Some(dir) = non_empty(explicit) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty(xdg_data_home) {
        return Ok(PathBuf::from(xdg).join("macrocopy"));
    }
    if let Some(home) = non_empty(home) {
        return Ok(PathBuf::from(home).join(".local/share/macrocopy"));
    }
    Err(ConfigError::NoDataDir)
}
