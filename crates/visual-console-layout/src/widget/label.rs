//! Entry labels, their styles and their measured widths in a terminal.

use crate::traits::{Measurer, ThemeProvider};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use visual_console_model::{LogEvent, Rgba, Severity};

/// Marker drawn in front of an unfolded group's label
const UNFOLDED_MARKER: &str = "▾ ";
/// Marker drawn in front of a folded group's label
const FOLDED_MARKER: &str = "▸ ";

/// The text of an entry button: first line of the message, with the
/// severity icon and, for groups, the fold marker.
pub fn entry_label(event: &LogEvent, folded: bool) -> String {
    let text = event.text.lines().next().unwrap_or_default();
    let marker = match (event.is_group_opener(), folded) {
        (false, _) => "",
        (true, false) => UNFOLDED_MARKER,
        (true, true) => FOLDED_MARKER,
    };
    format!(" {}{}{} ", marker, event.severity.icon(), text)
}

/// Measures entries by the display width of their label.
///
/// Both fold markers have the same width, so folding never changes a
/// button's size.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl Measurer for CellMeasurer {
    fn measure(&self, event: &LogEvent) -> u32 {
        Line::from(entry_label(event, false)).width() as u32
    }
}

fn to_color(rgba: Rgba) -> Color {
    if rgba.a == 0 {
        Color::Reset
    } else {
        Color::Rgb(rgba.r, rgba.g, rgba.b)
    }
}

/// Terminal style of an entry button.
///
/// Warnings, errors and asserts use the theme's severity colours instead of
/// the entry's own. Folded groups are dimmed.
pub fn entry_style<T: ThemeProvider>(
    event: &LogEvent,
    theme: &T,
    folded: bool,
    selected: bool,
) -> Style {
    let mut style = match event.severity {
        Severity::Info => Style::default()
            .fg(to_color(event.style.text_color))
            .bg(to_color(event.style.background_color)),
        Severity::Warning => Style::default()
            .fg(theme.warning_foreground())
            .bg(theme.warning_background()),
        Severity::Error | Severity::Assert => Style::default()
            .fg(theme.error_foreground())
            .bg(theme.error_background()),
    };

    if event.style.font_weight.is_bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if event.style.font_weight.is_italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if folded {
        style = style.add_modifier(Modifier::DIM);
    }
    if selected {
        style = style
            .fg(theme.selection_foreground())
            .bg(theme.selection_background());
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DefaultTheme;
    use visual_console_model::{FontWeight, LogStyleSpec, Palette};

    #[test]
    fn test_labels() {
        let palette = Palette::default();
        let plain = palette.log("hello\nsecond line", &LogStyleSpec::default());
        assert_eq!(entry_label(&plain, false), " hello ");

        let group = palette.open_group_default("g", "load");
        assert_eq!(entry_label(&group, false), " ▾ load ");
        assert_eq!(entry_label(&group, true), " ▸ load ");

        let warning = palette.plain("hot", Severity::Warning);
        assert_eq!(entry_label(&warning, false), " ⚠ hot ");
    }

    #[test]
    fn test_measure_counts_cells() {
        let palette = Palette::default();
        let group = palette.open_group_default("g", "load");
        assert_eq!(CellMeasurer.measure(&group), 8);
        assert_eq!(CellMeasurer.measure(&palette.plain("ab", Severity::Info)), 4);
    }

    #[test]
    fn test_entry_style() {
        let palette = Palette::default();
        let theme = DefaultTheme;
        let spec = LogStyleSpec::default()
            .text_color("black")
            .background_color("#ff0000")
            .font_weight(FontWeight::Bold);
        let event = palette.log("x", &spec);

        let style = entry_style(&event, &theme, false, false);
        assert_eq!(style.fg, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(style.bg, Some(Color::Rgb(255, 0, 0)));
        assert!(style.add_modifier.contains(Modifier::BOLD));

        let folded = entry_style(&event, &theme, true, false);
        assert!(folded.add_modifier.contains(Modifier::DIM));

        let error = palette.plain("boom", Severity::Error);
        let style = entry_style(&error, &theme, false, false);
        assert_eq!(style.bg, Some(theme.error_background()));
    }
}
