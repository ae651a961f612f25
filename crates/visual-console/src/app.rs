//! The console app: view state, key handling and the frame layout.

use crate::keymap::{self, Command};
use ratatui::crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::Widget;
use std::time::Instant;
use visual_console_layout::{
    CellMeasurer, ConsoleEvent, ConsoleView, ConsoleViewState, DefaultTheme, DetailPane,
    LayoutEngine,
};

/// Width of the detail pane when shown
const DETAIL_WIDTH_PERCENT: u16 = 35;

pub struct App {
    pub state: ConsoleViewState,
    pub theme: DefaultTheme,
    pub show_details: bool,
    pub running: bool,
}

impl App {
    pub fn new(engine: LayoutEngine, double_activation_window: std::time::Duration) -> Self {
        Self {
            state: ConsoleViewState::new(engine, double_activation_window),
            theme: DefaultTheme,
            show_details: true,
            running: true,
        }
    }

    /// Advance the console by one frame
    pub fn tick(&mut self) {
        self.state.tick(&CellMeasurer);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(command) = keymap::command_for(key) else {
            return;
        };

        match command {
            Command::Quit => self.running = false,
            Command::ToggleDetails => self.show_details = !self.show_details,
            Command::Console(action) => {
                for event in self.state.handle_action(action, now) {
                    self.on_console_event(event);
                }
            }
        }
    }

    fn on_console_event(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::FoldToggled { group_id, folded } => {
                log::debug!(
                    "Group '{}' {}",
                    group_id,
                    if folded { "folded" } else { "unfolded" }
                );
            }
            ConsoleEvent::Cleared => log::debug!("Console cleared by user"),
            ConsoleEvent::SelectionChanged { .. }
            | ConsoleEvent::CancelToggled { .. }
            | ConsoleEvent::PauseToggled { .. } => {}
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = if self.show_details {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(100 - DETAIL_WIDTH_PERCENT),
                    Constraint::Percentage(DETAIL_WIDTH_PERCENT),
                ])
                .split(area)
        } else {
            Layout::default()
                .constraints([Constraint::Min(0)])
                .split(area)
        };

        let engine = &self.state.engine;
        let hints = keymap::footer_hints(engine.is_cancelled(), engine.is_paused());
        ConsoleView::new(&self.theme)
            .with_footer_hints(hints)
            .render_with_state(chunks[0], buf, &mut self.state);

        if self.show_details {
            let detail = self.state.selected_detail();
            DetailPane::new(detail.as_ref(), &self.theme).render(chunks[1], buf);
        }
    }
}
