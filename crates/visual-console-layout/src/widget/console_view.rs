//! The console grid widget.

use super::label::{entry_label, entry_style};
use crate::model::SceneElement;
use crate::state::ConsoleViewState;
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

/// A single hint entry for the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterHint {
    /// The key (e.g., "c", "x").
    pub key: String,
    /// The description (e.g., "Clear", "Cancel").
    pub description: String,
}

impl FooterHint {
    /// Create a new footer hint.
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Renders the console scene: one terminal line per row, entries flowing
/// left to right.
///
/// # Example
///
/// ```ignore
/// use visual_console_layout::{ConsoleView, DefaultTheme};
///
/// let theme = DefaultTheme;
/// ConsoleView::new(&theme).render_with_state(area, frame.buffer_mut(), &mut state);
/// ```
pub struct ConsoleView<'a, T: ThemeProvider> {
    theme: &'a T,
    footer_hints: Vec<FooterHint>,
}

impl<'a, T: ThemeProvider> ConsoleView<'a, T> {
    pub fn new(theme: &'a T) -> Self {
        Self {
            theme,
            footer_hints: Vec::new(),
        }
    }

    /// Set footer hints to display at the bottom border.
    pub fn with_footer_hints(mut self, hints: Vec<FooterHint>) -> Self {
        self.footer_hints = hints;
        self
    }

    /// Render the console with state.
    pub fn render_with_state(self, area: Rect, buf: &mut Buffer, state: &mut ConsoleViewState) {
        let block = self.block(state);
        let inner = block.inner(area);
        block.render(area, buf);
        buf.set_style(inner, Style::default().bg(self.theme.background()));

        // Update viewport from actual render area (for scroll calculations)
        state.set_viewport(inner.width, inner.height);

        let rows = state.scene.row_count();
        let first_row = state.scroll_y.min(rows);
        let last_row = (first_row + inner.height as usize).min(rows);

        let mut drew_anything = false;
        for (line, row) in (first_row..last_row).enumerate() {
            let y = inner.y + line as u16;
            for (x, element) in state.scene.visible_entries(row) {
                let selected = state.selected == Some(element.id);
                drew_anything |= self.render_entry(element, x, y, inner, state.scroll_x, selected, buf);
            }
        }

        if !drew_anything && state.scene.last_entry().is_none() {
            let msg = "Waiting for logs…";
            let x = inner.x + inner.width.saturating_sub(Line::from(msg).width() as u16) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, msg, Style::default().fg(Color::DarkGray));
        }
    }

    fn block(&self, state: &ConsoleViewState) -> Block<'static> {
        // The console is the only pane taking keys
        let border_style = Style::default().fg(self.theme.border_focused());

        let mut status = vec![Span::raw(format!(" {} queued ", state.engine.pending()))];
        if state.engine.is_paused() {
            status.push(Span::styled(
                " PAUSED ",
                Style::default()
                    .fg(self.theme.warning_foreground())
                    .bg(self.theme.warning_background()),
            ));
        }
        if state.engine.is_cancelled() {
            status.push(Span::styled(
                " CANCELLED ",
                Style::default()
                    .fg(self.theme.error_foreground())
                    .bg(self.theme.error_background()),
            ));
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Visual Console ")
            .title(Line::from(status).right_aligned());

        if !self.footer_hints.is_empty() {
            block = block.title_bottom(self.footer_line());
        }
        block
    }

    fn footer_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for (i, hint) in self.footer_hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    " │ ",
                    Style::default().fg(self.theme.hint_text_foreground()),
                ));
            }
            spans.push(Span::styled(
                hint.key.clone(),
                Style::default()
                    .fg(self.theme.hint_key_foreground())
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", hint.description),
                Style::default().fg(self.theme.hint_text_foreground()),
            ));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }

    /// Draw the part of an entry that falls inside the viewport. Returns
    /// whether anything was drawn.
    #[allow(clippy::too_many_arguments)]
    fn render_entry(
        &self,
        element: &SceneElement,
        x: u32,
        y: u16,
        inner: Rect,
        scroll_x: u32,
        selected: bool,
        buf: &mut Buffer,
    ) -> bool {
        let Some(event) = element.event() else {
            return false;
        };

        let view_start = scroll_x;
        let view_end = scroll_x + u32::from(inner.width);
        let start = x.max(view_start);
        let end = (x + element.width).min(view_end);
        if start >= end {
            return false;
        }

        let folded = element.is_folded();
        let style = entry_style(event, self.theme, folded, selected);

        // Background across the whole (possibly widened) button
        let screen_x = |column: u32| inner.x + (column - view_start) as u16;
        let fill = " ".repeat((end - start) as usize);
        buf.set_string(screen_x(start), y, fill, style);

        let label = entry_label(event, folded);
        let mut column = x;
        let mut utf8 = [0u8; 4];
        for ch in label.chars() {
            let symbol: &str = ch.encode_utf8(&mut utf8);
            let width = Span::raw(symbol).width() as u32;
            if column >= start && column + width <= end {
                buf.set_string(screen_x(column), y, symbol, style);
            }
            column += width;
            if column >= end {
                break;
            }
        }
        true
    }
}
