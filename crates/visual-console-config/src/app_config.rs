//! Console configuration
//!
//! Configuration loaded from .visual-console.toml.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use visual_console_model::{ColorTable, LogPreset, Palette, PresetTable, Rgba};

/// Console configuration loaded from .visual-console.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Frame interval of the host loop in milliseconds. One queued event is
    /// laid out per frame.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Two activations of the same entry within this window toggle its fold
    #[serde(default = "default_double_activation_ms")]
    pub double_activation_ms: u64,

    /// Log level for the file logger when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extra named colours (name -> hex), added to or replacing the built-ins
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    /// Extra presets, added to or replacing the built-ins by name
    #[serde(default)]
    pub presets: Vec<LogPreset>,
}

fn default_tick_ms() -> u64 {
    16
}

fn default_double_activation_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            double_activation_ms: default_double_activation_ms(),
            log_level: default_log_level(),
            colors: BTreeMap::new(),
            presets: Vec::new(),
        }
    }
}

impl ConsoleConfig {
    /// Load config from CWD first, then home directory, or use defaults.
    ///
    /// A config file that does not parse is an error; callers usually fall
    /// back to the defaults and report it once logging is up.
    pub fn load() -> Result<Self> {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content).context("Failed to parse config file"),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn double_activation_window(&self) -> Duration {
        Duration::from_millis(self.double_activation_ms)
    }

    /// Built-in tables extended by the configured colours and presets.
    ///
    /// Colours with malformed hex values are skipped with a warning.
    pub fn palette(&self) -> Palette {
        let mut colors = ColorTable::builtin();
        for (name, hex) in &self.colors {
            match Rgba::parse_hex(hex) {
                Ok(color) => colors.insert(name.clone(), color),
                Err(e) => log::warn!("Ignoring colour '{}': {}", name, e),
            }
        }

        let mut presets = PresetTable::builtin();
        for preset in &self.presets {
            presets.insert(preset.clone());
        }

        Palette::new(colors, presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use visual_console_model::FontWeight;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.double_activation_window(), Duration::from_millis(200));
        assert!(config.colors.is_empty());
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            double_activation_ms = 350
        "#;
        let config: ConsoleConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.double_activation_ms, 350);
        // Other fields should use defaults
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_palette_merges_tables() {
        let toml = r##"
            [colors]
            brand = "#123456"
            broken = "123456"

            [[presets]]
            name = "alert"
            text_color = "black"
            background_color = "brand"
            border_radius = 6
            font_size = 16
            font_weight = "bold_and_italic"
        "##;
        let config: ConsoleConfig = toml::from_str(toml).unwrap();
        let palette = config.palette();

        assert_eq!(palette.colors.get("brand"), Some(Rgba::rgb(0x12, 0x34, 0x56)));
        assert_eq!(palette.colors.get("broken"), None);
        // Built-ins are still there
        assert!(palette.colors.get("rebeccapurple").is_some());
        assert_eq!(palette.presets.len(), 21);

        let style = palette.resolve_preset("alert");
        assert_eq!(style.background_color, Rgba::rgb(0x12, 0x34, 0x56));
        assert_eq!(style.font_weight, FontWeight::BoldAndItalic);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let path = std::env::temp_dir().join(format!(
            "visual-console-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "tick_ms = \"fast\"").unwrap();

        let err = ConsoleConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Failed to parse config file"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_tick_interval_never_zero() {
        let config = ConsoleConfig {
            tick_ms: 0,
            ..ConsoleConfig::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}
