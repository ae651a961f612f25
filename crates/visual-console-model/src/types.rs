//! Type definitions for visual console log events

use crate::colors::Rgba;
use serde::{Deserialize, Serialize};

/// Severity reported to the native logging facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Assert,
}

impl Severity {
    /// Warnings, errors and asserts are drawn with a fixed severity palette
    /// instead of the entry's own colours.
    pub fn overrides_style(&self) -> bool {
        !matches!(self, Self::Info)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Warning => "⚠ ",
            Self::Error => "✖ ",
            Self::Assert => "‼ ",
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Self::Info,
        }
    }
}

impl From<Severity> for log::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error | Severity::Assert => log::Level::Error,
        }
    }
}

/// Font weight and slant of an entry's label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldAndItalic,
}

impl FontWeight {
    pub fn is_bold(&self) -> bool {
        matches!(self, Self::Bold | Self::BoldAndItalic)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, Self::Italic | Self::BoldAndItalic)
    }
}

/// Fully resolved style of an entry. Never symbolic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStyle {
    /// Label colour
    pub text_color: Rgba,

    /// Button fill colour
    pub background_color: Rgba,

    /// Corner radius in pixels
    pub border_radius: u16,

    /// Font size in pixels
    pub font_size: u16,

    /// Weight/slant of the label
    pub font_weight: FontWeight,
}

/// Symbolic style request as passed by callers of the logging API.
///
/// Colour fields accept a colour name from the colour table or a hex literal.
/// Resolution into a [`LogStyle`] happens once, at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStyleSpec {
    pub text_color: String,
    pub font_size: u16,
    pub font_weight: FontWeight,
    pub background_color: String,
    pub border_radius: u16,
}

impl Default for LogStyleSpec {
    fn default() -> Self {
        Self {
            text_color: "white".to_string(),
            font_size: 14,
            font_weight: FontWeight::Normal,
            background_color: "yellowgreen".to_string(),
            border_radius: 3,
        }
    }
}

impl LogStyleSpec {
    /// Style used by `open_group` when the caller passes no style at all.
    pub fn group_default() -> Self {
        Self {
            text_color: "forestgreen".to_string(),
            font_size: 12,
            font_weight: FontWeight::Normal,
            background_color: "yellowgreen".to_string(),
            border_radius: 2,
        }
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn border_radius(mut self, radius: u16) -> Self {
        self.border_radius = radius;
        self
    }
}

/// What an event does to the group structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Ordinary entry placed on the current row
    Plain,

    /// Opens a collapsible group: everything logged until the matching close
    /// goes on the row beneath it
    OpenGroup {
        /// Group id, unique among active groups
        id: String,
    },

    /// Closes the active group with this id. Creates no entry.
    CloseGroup {
        /// Group id
        id: String,
    },
}

/// A single log event, immutable once queued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Message text
    pub text: String,

    /// Captured call stack (may be empty)
    pub stack_trace: String,

    /// Severity
    pub severity: Severity,

    /// Plain entry, group open or group close
    pub kind: EventKind,

    /// Resolved style
    pub style: LogStyle,

    /// Optional label of the object the log refers to
    pub context: Option<String>,
}

impl LogEvent {
    /// Group id this event opens or closes, `None` for plain entries
    pub fn group_id(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Plain => None,
            EventKind::OpenGroup { id } | EventKind::CloseGroup { id } => Some(id),
        }
    }

    pub fn is_group_opener(&self) -> bool {
        matches!(self.kind, EventKind::OpenGroup { .. })
    }

    pub fn is_group_closer(&self) -> bool {
        matches!(self.kind, EventKind::CloseGroup { .. })
    }

    /// Attach a captured stack trace
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }

    /// Attach a context label
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_level_mapping() {
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from(log::Level::Debug), Severity::Info);
        assert_eq!(log::Level::from(Severity::Assert), log::Level::Error);
        assert!(Severity::Error.overrides_style());
        assert!(!Severity::Info.overrides_style());
    }

    #[test]
    fn test_style_spec_defaults() {
        let spec = LogStyleSpec::default();
        assert_eq!(spec.text_color, "white");
        assert_eq!(spec.background_color, "yellowgreen");
        assert_eq!(spec.font_size, 14);
        assert_eq!(spec.border_radius, 3);

        let group = LogStyleSpec::group_default();
        assert_eq!(group.text_color, "forestgreen");
        assert_eq!(group.font_size, 12);
        assert_eq!(group.border_radius, 2);
    }

    #[test]
    fn test_font_weight_flags() {
        assert!(FontWeight::BoldAndItalic.is_bold());
        assert!(FontWeight::BoldAndItalic.is_italic());
        assert!(!FontWeight::Italic.is_bold());
    }
}
