//! Named style presets

use crate::types::{FontWeight, LogStyleSpec};
use serde::{Deserialize, Serialize};

/// Name of the preset used when a lookup misses
pub const DEFAULT_PRESET_NAME: &str = "default";

/// A named bundle of the five style fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPreset {
    pub name: String,
    pub text_color: String,
    pub background_color: String,
    pub border_radius: u16,
    #[serde(alias = "text_size")]
    pub font_size: u16,
    #[serde(default)]
    pub font_weight: FontWeight,
}

impl LogPreset {
    /// The fallback preset for unknown names
    pub fn fallback() -> Self {
        Self {
            name: DEFAULT_PRESET_NAME.to_string(),
            text_color: "white".to_string(),
            background_color: "yellowgreen".to_string(),
            border_radius: 3,
            font_size: 12,
            font_weight: FontWeight::Normal,
        }
    }

    pub fn style_spec(&self) -> LogStyleSpec {
        LogStyleSpec {
            text_color: self.text_color.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            background_color: self.background_color.clone(),
            border_radius: self.border_radius,
        }
    }
}

/// Ordered preset list. Later entries with the same name replace earlier ones.
#[derive(Debug, Clone)]
pub struct PresetTable {
    presets: Vec<LogPreset>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetTable {
    pub fn empty() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    /// The twenty built-in presets `a` through `t`
    pub fn builtin() -> Self {
        use FontWeight::*;
        let rows: [(&str, &str, &str, u16, u16, FontWeight); 20] = [
            ("a", "#7fffd4", "#3498DB", 5, 12, Normal),
            ("b", "#8b0000", "#E74C3C", 10, 14, Bold),
            ("c", "#006400", "#2ECC71", 15, 16, BoldAndItalic),
            ("d", "#8b4513", "#F39C12", 20, 18, Bold),
            ("e", "#8b008b", "#9B59B6", 5, 12, Bold),
            ("f", "#0000ff", "#1ABC9C", 10, 14, BoldAndItalic),
            ("g", "#FFFFFF", "#E67E22", 15, 16, Bold),
            ("h", "#6495ed", "#34495E", 20, 18, Bold),
            ("i", "#696969", "#95A5A6", 5, 12, BoldAndItalic),
            ("j", "#000000", "#D35400", 10, 14, Normal),
            ("k", "#ffd700", "#27AE60", 15, 16, Bold),
            ("l", "#ffa500", "#C0392B", 20, 18, Italic),
            ("m", "#FFFFFF", "#16A085", 5, 12, Bold),
            ("n", "#000000", "#8E44AD", 10, 14, BoldAndItalic),
            ("o", "#FFFFFF", "#2980B9", 15, 16, Bold),
            ("p", "#000000", "#F1C40F", 20, 18, Bold),
            ("q", "#FFFFFF", "#7F8C8D", 5, 12, BoldAndItalic),
            ("r", "#000000", "#2C3E50", 10, 14, Bold),
            ("s", "#FFFFFF", "#1F618D", 15, 16, Normal),
            ("t", "#000000", "#A93226", 20, 18, Bold),
        ];

        let presets = rows
            .iter()
            .map(|(name, text, background, radius, size, weight)| LogPreset {
                name: (*name).to_string(),
                text_color: (*text).to_string(),
                background_color: (*background).to_string(),
                border_radius: *radius,
                font_size: *size,
                font_weight: *weight,
            })
            .collect();

        Self { presets }
    }

    /// Add a preset, replacing any existing preset with the same name
    pub fn insert(&mut self, preset: LogPreset) {
        self.presets.retain(|p| p.name != preset.name);
        self.presets.push(preset);
    }

    pub fn get(&self, name: &str) -> Option<&LogPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Look up a preset, falling back to [`LogPreset::fallback`]
    pub fn get_or_default(&self, name: &str) -> LogPreset {
        match self.get(name) {
            Some(preset) => preset.clone(),
            None => {
                log::debug!("Unknown preset '{}', using default preset", name);
                LogPreset::fallback()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let table = PresetTable::builtin();
        assert_eq!(table.len(), 20);
        let b = table.get("b").unwrap();
        assert_eq!(b.background_color, "#E74C3C");
        assert_eq!(b.font_weight, FontWeight::Bold);
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let table = PresetTable::builtin();
        let preset = table.get_or_default("does-not-exist");
        assert_eq!(preset, LogPreset::fallback());
        assert_eq!(preset.font_size, 12);
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut table = PresetTable::builtin();
        let mut custom = LogPreset::fallback();
        custom.name = "a".to_string();
        custom.font_size = 30;
        table.insert(custom);
        assert_eq!(table.len(), 20);
        assert_eq!(table.get("a").unwrap().font_size, 30);
    }

    #[test]
    fn test_preset_deserialize_with_alias() {
        let preset: LogPreset = toml::from_str(
            r##"
            name = "alert"
            text_color = "black"
            background_color = "#ff0000"
            border_radius = 4
            text_size = 16
            font_weight = "bold"
            "##,
        )
        .unwrap();
        assert_eq!(preset.font_size, 16);
        assert_eq!(preset.font_weight, FontWeight::Bold);
    }
}
