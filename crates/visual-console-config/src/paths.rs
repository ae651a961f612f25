//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/visual-console/`, `~/.cache/visual-console/`
//! - macOS: `~/Library/Application Support/visual-console/`, `~/Library/Caches/visual-console/`
//! - Windows: `%APPDATA%\visual-console\`, `%LOCALAPPDATA%\visual-console\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "visual-console";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed.
/// Release builds write their log files here.
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// File name of a log file started at `timestamp` (formatted `%Y%m%d-%H%M%S`)
pub fn log_file_name(timestamp: &str) -> String {
    format!("{}-{}.log", APP_NAME, timestamp)
}
