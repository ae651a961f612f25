//! Event factory
//!
//! Turns the raw arguments of a logging call into a fully resolved
//! [`LogEvent`]. All colour names and preset names are resolved here, at call
//! time, so later changes to the tables never affect emitted events.

use crate::colors::{ColorTable, FALLBACK_BACKGROUND_COLOR, FALLBACK_TEXT_COLOR};
use crate::presets::PresetTable;
use crate::types::{EventKind, LogEvent, LogStyle, LogStyleSpec, Severity};

/// Colour and preset tables used to resolve styles
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub colors: ColorTable,
    pub presets: PresetTable,
}

impl Palette {
    pub fn new(colors: ColorTable, presets: PresetTable) -> Self {
        Self { colors, presets }
    }

    /// Resolve a symbolic style into concrete values
    pub fn resolve(&self, spec: &LogStyleSpec) -> LogStyle {
        LogStyle {
            text_color: self.colors.resolve_or(&spec.text_color, FALLBACK_TEXT_COLOR),
            background_color: self
                .colors
                .resolve_or(&spec.background_color, FALLBACK_BACKGROUND_COLOR),
            border_radius: spec.border_radius,
            font_size: spec.font_size,
            font_weight: spec.font_weight,
        }
    }

    /// Resolve a preset name (unknown names use the default preset)
    pub fn resolve_preset(&self, preset_name: &str) -> LogStyle {
        self.resolve(&self.presets.get_or_default(preset_name).style_spec())
    }

    /// A plain styled entry
    pub fn log(&self, message: impl Into<String>, spec: &LogStyleSpec) -> LogEvent {
        self.event(message.into(), EventKind::Plain, self.resolve(spec))
    }

    /// A plain entry styled by a named preset
    pub fn log_with_preset(&self, message: impl Into<String>, preset_name: &str) -> LogEvent {
        self.event(message.into(), EventKind::Plain, self.resolve_preset(preset_name))
    }

    /// An entry that opens group `id`. An empty id yields a plain entry.
    pub fn open_group(
        &self,
        id: impl Into<String>,
        message: impl Into<String>,
        spec: &LogStyleSpec,
    ) -> LogEvent {
        self.event(message.into(), Self::opener_kind(id.into()), self.resolve(spec))
    }

    /// Group opener with the documented default group style
    pub fn open_group_default(&self, id: impl Into<String>, message: impl Into<String>) -> LogEvent {
        self.open_group(id, message, &LogStyleSpec::group_default())
    }

    /// Group opener styled by a named preset
    pub fn open_group_with_preset(
        &self,
        id: impl Into<String>,
        message: impl Into<String>,
        preset_name: &str,
    ) -> LogEvent {
        self.event(
            message.into(),
            Self::opener_kind(id.into()),
            self.resolve_preset(preset_name),
        )
    }

    /// The marker that closes group `id`
    pub fn close_group(&self, id: impl Into<String>) -> LogEvent {
        let id = id.into();
        self.event(
            format!("End of group: {}", id),
            EventKind::CloseGroup { id },
            self.resolve(&LogStyleSpec::default()),
        )
    }

    /// An unstyled entry as produced by the platform's default logging
    pub fn plain(&self, message: impl Into<String>, severity: Severity) -> LogEvent {
        self.log(message, &LogStyleSpec::default())
            .with_severity(severity)
    }

    fn opener_kind(id: String) -> EventKind {
        if id.is_empty() {
            EventKind::Plain
        } else {
            EventKind::OpenGroup { id }
        }
    }

    fn event(&self, text: String, kind: EventKind, style: LogStyle) -> LogEvent {
        LogEvent {
            text,
            stack_trace: String::new(),
            severity: Severity::Info,
            kind,
            style,
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgba;
    use crate::types::FontWeight;

    #[test]
    fn test_log_resolves_names() {
        let palette = Palette::default();
        let event = palette.log("hello", &LogStyleSpec::default().text_color("red"));
        assert_eq!(event.style.text_color, Rgba::rgb(255, 0, 0));
        assert_eq!(event.style.background_color, Rgba::rgb(0x9a, 0xcd, 0x32));
        assert_eq!(event.style.font_size, 14);
        assert_eq!(event.kind, EventKind::Plain);
    }

    #[test]
    fn test_unknown_names_use_documented_fallbacks() {
        let palette = Palette::default();
        let spec = LogStyleSpec::default()
            .text_color("nope")
            .background_color("also-nope");
        let event = palette.log("x", &spec);
        assert_eq!(event.style.text_color, Rgba::rgb(0x9a, 0xcd, 0x32));
        assert_eq!(event.style.background_color, Rgba::rgb(0x22, 0x8b, 0x22));
    }

    #[test]
    fn test_resolution_happens_at_call_time() {
        let mut palette = Palette::default();
        let event = palette.log("x", &LogStyleSpec::default().text_color("brand"));
        palette.colors.insert("brand", Rgba::rgb(1, 2, 3));
        // Already emitted events keep the colour they resolved to
        assert_eq!(event.style.text_color, Rgba::rgb(0x9a, 0xcd, 0x32));
        let later = palette.log("y", &LogStyleSpec::default().text_color("brand"));
        assert_eq!(later.style.text_color, Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_preset_resolution() {
        let palette = Palette::default();
        let event = palette.log_with_preset("boom", "b");
        assert_eq!(event.style.background_color, Rgba::rgb(0xe7, 0x4c, 0x3c));
        assert_eq!(event.style.font_weight, FontWeight::Bold);

        let unknown = palette.log_with_preset("boom", "zzz");
        assert_eq!(unknown.style.text_color, Rgba::WHITE);
        assert_eq!(unknown.style.font_size, 12);
    }

    #[test]
    fn test_group_open_and_close() {
        let palette = Palette::default();
        let open = palette.open_group_default("g1", "start");
        assert!(open.is_group_opener());
        assert_eq!(open.group_id(), Some("g1"));
        assert_eq!(open.style.border_radius, 2);
        assert_eq!(open.style.text_color, Rgba::rgb(0x22, 0x8b, 0x22));

        let close = palette.close_group("g1");
        assert!(close.is_group_closer());
        assert_eq!(close.group_id(), Some("g1"));
    }

    #[test]
    fn test_empty_group_id_is_plain() {
        let palette = Palette::default();
        let event = palette.open_group_default("", "not a group");
        assert_eq!(event.kind, EventKind::Plain);
        assert_eq!(event.group_id(), None);
    }
}
