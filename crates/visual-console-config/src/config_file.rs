use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".visual-console.toml";

/// Load config file content
///
/// Searches for .visual-console.toml in:
/// 1. Current working directory
/// 2. Home directory
/// 3. The application config directory as config.toml
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    // Try current directory first
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    let candidates = [
        get_home_config_path(),
        crate::paths::app_config_path().ok(),
    ];
    for path in candidates.into_iter().flatten() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }

    None
}

/// ~/.visual-console.toml if HOME is set
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
