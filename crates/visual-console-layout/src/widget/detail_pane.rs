//! Detail pane for the selected entry: full text, context and stack trace.

use crate::state::EntryDetail;
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use visual_console_model::Severity;

pub struct DetailPane<'a, T: ThemeProvider> {
    detail: Option<&'a EntryDetail>,
    theme: &'a T,
}

impl<'a, T: ThemeProvider> DetailPane<'a, T> {
    pub fn new(detail: Option<&'a EntryDetail>, theme: &'a T) -> Self {
        Self { detail, theme }
    }

    fn lines(&self, detail: &EntryDetail) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let text_style = match detail.severity {
            Severity::Info => Style::default(),
            Severity::Warning => Style::default()
                .fg(self.theme.warning_foreground())
                .bg(self.theme.warning_background()),
            Severity::Error | Severity::Assert => Style::default()
                .fg(self.theme.error_foreground())
                .bg(self.theme.error_background()),
        };
        for (i, text) in detail.text.lines().enumerate() {
            let prefix = if i == 0 { detail.severity.icon() } else { "" };
            lines.push(Line::from(Span::styled(format!("{prefix}{text}"), text_style)));
        }

        let muted = Style::default().fg(Color::DarkGray);
        if let Some(group_id) = &detail.group_id {
            lines.push(Line::from(vec![
                Span::styled("group: ", muted),
                Span::raw(group_id.clone()),
            ]));
        }
        if let Some(context) = &detail.context {
            lines.push(Line::from(vec![
                Span::styled("context: ", muted),
                Span::raw(context.clone()),
            ]));
        }

        if !detail.trace.is_empty() {
            lines.push(Line::default());
            let link_style = Style::default()
                .fg(self.theme.trace_link_foreground())
                .add_modifier(Modifier::UNDERLINED);
            for trace in &detail.trace {
                let mut spans = vec![Span::styled(trace.before.clone(), muted)];
                if let Some(link) = &trace.link {
                    spans.push(Span::styled(link.clone(), link_style));
                }
                if !trace.after.is_empty() {
                    spans.push(Span::styled(trace.after.clone(), muted));
                }
                lines.push(Line::from(spans));
            }
        }

        lines
    }
}

impl<T: ThemeProvider> Widget for DetailPane<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border()))
            .title(" Details ");

        let lines = match self.detail {
            Some(detail) => self.lines(detail),
            None => vec![Line::from(Span::styled(
                "Select an entry to see its details",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(self.theme.background()))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DefaultTheme;
    use visual_console_model::parse_stack_trace;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_text_context_and_trace() {
        let detail = EntryDetail {
            text: "boom".to_string(),
            severity: Severity::Error,
            trace: parse_stack_trace("main (at src/main.rs:42)"),
            context: Some("Player".to_string()),
            group_id: None,
        };
        let theme = DefaultTheme;
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        DetailPane::new(Some(&detail), &theme).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("✖ boom"));
        assert!(row_text(&buf, 2).contains("context: Player"));
        assert!(row_text(&buf, 4).contains("(at src/main.rs:42)"));
        assert_eq!(buf[(1, 1)].bg, theme.error_background());
    }

    #[test]
    fn test_renders_hint_without_selection() {
        let theme = DefaultTheme;
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        DetailPane::new(None, &theme).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Select an entry"));
    }
}
