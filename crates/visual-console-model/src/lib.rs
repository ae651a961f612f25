//! Visual Console Model
//!
//! The data side of the visual console: log events (plain entries, group
//! openers and group closers), their fully resolved styles, the named colour
//! and preset tables used to resolve them, and helpers for producers that
//! speak a line-oriented command syntax.
//!
//! # Example
//!
//! ```
//! use visual_console_model::{LogStyleSpec, Palette};
//!
//! let palette = Palette::default();
//! let open = palette.open_group_default("load", "Loading level");
//! let entry = palette.log("Spawned 12 enemies", &LogStyleSpec::default().text_color("gold"));
//! let close = palette.close_group("load");
//!
//! assert!(open.is_group_opener());
//! assert_eq!(entry.style.text_color.to_hex(), "#FFD700FF");
//! assert!(close.is_group_closer());
//! ```

mod colors;
mod commands;
mod palette;
mod presets;
mod trace;
mod types;

pub use colors::{
    ColorParseError, ColorTable, FALLBACK_BACKGROUND_COLOR, FALLBACK_TEXT_COLOR, Rgba,
};
pub use commands::{CommandParams, ConsoleCommand, parse_command, parse_line};
pub use palette::Palette;
pub use presets::{DEFAULT_PRESET_NAME, LogPreset, PresetTable};
pub use trace::{SourceLocation, TraceLine, parse_stack_trace};
pub use types::*;
