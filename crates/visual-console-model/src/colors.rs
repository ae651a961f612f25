//! Named colour table
//!
//! Resolves colour names (CSS named colours plus `transparent`) and hex
//! literals into concrete RGBA values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Fallback for an unknown text colour name
pub const FALLBACK_TEXT_COLOR: &str = "yellowgreen";

/// Fallback for an unknown background colour name
pub const FALLBACK_BACKGROUND_COLOR: &str = "forestgreen";

/// Errors from parsing a hex colour literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Colour literal must start with '#': {0}")]
    MissingHash(String),

    #[error("Colour literal must have 3, 4, 6 or 8 hex digits: {0}")]
    InvalidLength(String),

    #[error("Invalid hex digit in colour literal: {0}")]
    InvalidDigit(String),
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
    pub fn parse_hex(literal: &str) -> Result<Self, ColorParseError> {
        let digits = literal
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(literal.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(literal.to_string()));
        }

        let nibble = |i: usize| -> u8 {
            // Checked above: every char is an ASCII hex digit
            u8::from_str_radix(&digits[i..=i], 16).unwrap_or(0)
        };
        let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
            4 => Ok(Self::new(
                nibble(0) * 17,
                nibble(1) * 17,
                nibble(2) * 17,
                nibble(3) * 17,
            )),
            6 => Ok(Self::rgb(byte(0), byte(2), byte(4))),
            8 => Ok(Self::new(byte(0), byte(2), byte(4), byte(6))),
            _ => Err(ColorParseError::InvalidLength(literal.to_string())),
        }
    }

    /// `#RRGGBBAA`, upper case
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        Rgba::parse_hex(&literal).map_err(serde::de::Error::custom)
    }
}

/// Lookup table from colour name to RGBA
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: HashMap<String, Rgba>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColorTable {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// The built-in CSS colour names
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (name, hex) in NAMED_COLORS {
            // Built-in literals are all well formed
            if let Ok(color) = Rgba::parse_hex(hex) {
                table.colors.insert((*name).to_string(), color);
            }
        }
        table.colors.insert("transparent".to_string(), Rgba::TRANSPARENT);
        table
    }

    /// Add or replace a named colour
    pub fn insert(&mut self, name: impl Into<String>, color: Rgba) {
        self.colors.insert(name.into().to_lowercase(), color);
    }

    /// Look up a colour by name or hex literal
    pub fn get(&self, name: &str) -> Option<Rgba> {
        let name = name.trim();
        if name.starts_with('#') {
            return Rgba::parse_hex(name).ok();
        }
        self.colors.get(&name.to_lowercase()).copied()
    }

    /// Resolve a name, falling back to `fallback` (itself a name) and finally
    /// to white when even the fallback is missing.
    pub fn resolve_or(&self, name: &str, fallback: &str) -> Rgba {
        self.get(name).unwrap_or_else(|| {
            log::debug!("Unknown colour name '{}', using '{}'", name, fallback);
            self.get(fallback).unwrap_or(Rgba::WHITE)
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

const NAMED_COLORS: &[(&str, &str)] = &[
    ("aliceblue", "#f0f8ff"),
    ("antiquewhite", "#faebd7"),
    ("aqua", "#00ffff"),
    ("aquamarine", "#7fffd4"),
    ("azure", "#f0ffff"),
    ("beige", "#f5f5dc"),
    ("bisque", "#ffe4c4"),
    ("black", "#000000"),
    ("blanchedalmond", "#ffebcd"),
    ("blue", "#0000ff"),
    ("blueviolet", "#8a2be2"),
    ("brown", "#a52a2a"),
    ("burlywood", "#deb887"),
    ("cadetblue", "#5f9ea0"),
    ("chartreuse", "#7fff00"),
    ("chocolate", "#d2691e"),
    ("coral", "#ff7f50"),
    ("cornflowerblue", "#6495ed"),
    ("cornsilk", "#fff8dc"),
    ("crimson", "#dc143c"),
    ("cyan", "#00ffff"),
    ("darkblue", "#00008b"),
    ("darkcyan", "#008b8b"),
    ("darkgoldenrod", "#b8860b"),
    ("darkgray", "#a9a9a9"),
    ("darkgreen", "#006400"),
    ("darkgrey", "#a9a9a9"),
    ("darkkhaki", "#bdb76b"),
    ("darkmagenta", "#8b008b"),
    ("darkolivegreen", "#556b2f"),
    ("darkorange", "#ff8c00"),
    ("darkorchid", "#9932cc"),
    ("darkred", "#8b0000"),
    ("darksalmon", "#e9967a"),
    ("darkseagreen", "#8fbc8f"),
    ("darkslateblue", "#483d8b"),
    ("darkslategray", "#2f4f4f"),
    ("darkslategrey", "#2f4f4f"),
    ("darkturquoise", "#00ced1"),
    ("darkviolet", "#9400d3"),
    ("deeppink", "#ff1493"),
    ("deepskyblue", "#00bfff"),
    ("dimgray", "#696969"),
    ("dimgrey", "#696969"),
    ("dodgerblue", "#1e90ff"),
    ("firebrick", "#b22222"),
    ("floralwhite", "#fffaf0"),
    ("forestgreen", "#228b22"),
    ("fuchsia", "#ff00ff"),
    ("gainsboro", "#dcdcdc"),
    ("ghostwhite", "#f8f8ff"),
    ("gold", "#ffd700"),
    ("goldenrod", "#daa520"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("greenyellow", "#adff2f"),
    ("grey", "#808080"),
    ("honeydew", "#f0fff0"),
    ("hotpink", "#ff69b4"),
    ("indianred", "#cd5c5c"),
    ("indigo", "#4b0082"),
    ("ivory", "#fffff0"),
    ("khaki", "#f0e68c"),
    ("lavender", "#e6e6fa"),
    ("lavenderblush", "#fff0f5"),
    ("lawngreen", "#7cfc00"),
    ("lemonchiffon", "#fffacd"),
    ("lightblue", "#add8e6"),
    ("lightcoral", "#f08080"),
    ("lightcyan", "#e0ffff"),
    ("lightgoldenrodyellow", "#fafad2"),
    ("lightgray", "#d3d3d3"),
    ("lightgreen", "#90ee90"),
    ("lightgrey", "#d3d3d3"),
    ("lightpink", "#ffb6c1"),
    ("lightsalmon", "#ffa07a"),
    ("lightseagreen", "#20b2aa"),
    ("lightskyblue", "#87cefa"),
    ("lightslategray", "#778899"),
    ("lightslategrey", "#778899"),
    ("lightsteelblue", "#b0c4de"),
    ("lightyellow", "#ffffe0"),
    ("lime", "#00ff00"),
    ("limegreen", "#32cd32"),
    ("linen", "#faf0e6"),
    ("magenta", "#ff00ff"),
    ("maroon", "#800000"),
    ("mediumaquamarine", "#66cdaa"),
    ("mediumblue", "#0000cd"),
    ("mediumorchid", "#ba55d3"),
    ("mediumpurple", "#9370db"),
    ("mediumseagreen", "#3cb371"),
    ("mediumslateblue", "#7b68ee"),
    ("mediumspringgreen", "#00fa9a"),
    ("mediumturquoise", "#48d1cc"),
    ("mediumvioletred", "#c71585"),
    ("midnightblue", "#191970"),
    ("mintcream", "#f5fffa"),
    ("mistyrose", "#ffe4e1"),
    ("moccasin", "#ffe4b5"),
    ("navajowhite", "#ffdead"),
    ("navy", "#000080"),
    ("oldlace", "#fdf5e6"),
    ("olive", "#808000"),
    ("olivedrab", "#6b8e23"),
    ("orange", "#ffa500"),
    ("orangered", "#ff4500"),
    ("orchid", "#da70d6"),
    ("palegoldenrod", "#eee8aa"),
    ("palegreen", "#98fb98"),
    ("paleturquoise", "#afeeee"),
    ("palevioletred", "#db7093"),
    ("papayawhip", "#ffefd5"),
    ("peachpuff", "#ffdab9"),
    ("peru", "#cd853f"),
    ("pink", "#ffc0cb"),
    ("plum", "#dda0dd"),
    ("powderblue", "#b0e0e6"),
    ("purple", "#800080"),
    ("rebeccapurple", "#663399"),
    ("red", "#ff0000"),
    ("rosybrown", "#bc8f8f"),
    ("royalblue", "#4169e1"),
    ("saddlebrown", "#8b4513"),
    ("salmon", "#fa8072"),
    ("sandybrown", "#f4a460"),
    ("seagreen", "#2e8b57"),
    ("seashell", "#fff5ee"),
    ("sienna", "#a0522d"),
    ("silver", "#c0c0c0"),
    ("skyblue", "#87ceeb"),
    ("slateblue", "#6a5acd"),
    ("slategray", "#708090"),
    ("slategrey", "#708090"),
    ("snow", "#fffafa"),
    ("springgreen", "#00ff7f"),
    ("steelblue", "#4682b4"),
    ("tan", "#d2b48c"),
    ("teal", "#008080"),
    ("thistle", "#d8bfd8"),
    ("tomato", "#ff6347"),
    ("turquoise", "#40e0d0"),
    ("violet", "#ee82ee"),
    ("wheat", "#f5deb3"),
    ("white", "#ffffff"),
    ("whitesmoke", "#f5f5f5"),
    ("yellow", "#ffff00"),
    ("yellowgreen", "#9acd32"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_size() {
        let table = ColorTable::builtin();
        assert!(table.len() >= 140);
        assert_eq!(table.get("transparent"), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = ColorTable::builtin();
        assert_eq!(table.get("ForestGreen"), Some(Rgba::rgb(0x22, 0x8b, 0x22)));
    }

    #[test]
    fn test_hex_literals() {
        assert_eq!(Rgba::parse_hex("#7fffd4"), Ok(Rgba::rgb(0x7f, 0xff, 0xd4)));
        assert_eq!(Rgba::parse_hex("#fff"), Ok(Rgba::WHITE));
        assert_eq!(Rgba::parse_hex("#00000000"), Ok(Rgba::TRANSPARENT));
        assert!(matches!(
            Rgba::parse_hex("7fffd4"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            Rgba::parse_hex("#12345"),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            Rgba::parse_hex("#zzzzzz"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_to_hex_is_rgba_upper() {
        assert_eq!(Rgba::rgb(0x9a, 0xcd, 0x32).to_hex(), "#9ACD32FF");
    }

    #[test]
    fn test_resolve_falls_back() {
        let table = ColorTable::builtin();
        let color = table.resolve_or("not-a-colour", FALLBACK_BACKGROUND_COLOR);
        assert_eq!(color, Rgba::rgb(0x22, 0x8b, 0x22));

        let empty = ColorTable::empty();
        assert_eq!(empty.resolve_or("red", "blue"), Rgba::WHITE);
        // Hex literals work without any table entries
        assert_eq!(empty.resolve_or("#ff0000", "blue"), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = ColorTable::builtin();
        table.insert("Brand", Rgba::rgb(1, 2, 3));
        assert_eq!(table.get("brand"), Some(Rgba::rgb(1, 2, 3)));
    }
}
