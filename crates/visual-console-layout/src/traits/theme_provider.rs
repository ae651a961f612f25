//! Trait for providing theme configuration to the console view.

use ratatui::style::Color;

/// Provides the colours the console view draws with, apart from the entries'
/// own resolved styles.
///
/// Implement this trait to integrate the console with your application's
/// theme system.
pub trait ThemeProvider: Send + Sync {
    /// Background of the console area.
    fn background(&self) -> Color {
        Color::Reset
    }

    /// Border colour of panes without focus.
    fn border(&self) -> Color {
        Color::DarkGray
    }

    /// Border colour of the focused pane.
    fn border_focused(&self) -> Color {
        Color::White
    }

    /// Background of warning entries (overrides the entry style).
    fn warning_background(&self) -> Color {
        Color::Yellow
    }

    /// Foreground of warning entries.
    fn warning_foreground(&self) -> Color {
        Color::Black
    }

    /// Background of error and assert entries (overrides the entry style).
    fn error_background(&self) -> Color {
        Color::Rgb(0xd0, 0x04, 0x00)
    }

    /// Foreground of error and assert entries.
    fn error_foreground(&self) -> Color {
        Color::Black
    }

    /// Background of the selected entry.
    fn selection_background(&self) -> Color;

    /// Foreground of the selected entry.
    fn selection_foreground(&self) -> Color {
        Color::Black
    }

    /// Foreground of source locations in the detail pane.
    fn trace_link_foreground(&self) -> Color {
        Color::Cyan
    }

    /// Foreground of the key part of footer hints.
    fn hint_key_foreground(&self) -> Color {
        Color::Yellow
    }

    /// Foreground of footer hint descriptions.
    fn hint_text_foreground(&self) -> Color {
        Color::DarkGray
    }
}

/// Default theme with sensible dark-mode colors.
#[derive(Debug, Clone, Default)]
pub struct DefaultTheme;

impl ThemeProvider for DefaultTheme {
    fn selection_background(&self) -> Color {
        Color::LightCyan
    }
}
