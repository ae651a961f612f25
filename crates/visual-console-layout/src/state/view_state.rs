//! Interactive state of the console view.

use super::{ActivationTracker, EntryDetail, LayoutEngine};
use crate::action::ConsoleAction;
use crate::event::{ConsoleEvent, LayoutCommand};
use crate::model::{ConsoleScene, ElementId, GroupIndex};
use crate::traits::Measurer;
use std::time::{Duration, Instant};

/// Cells moved per scroll action
const SCROLL_STEP: u32 = 8;

/// The engine, the scene it drives and everything the user interacts with.
#[derive(Debug)]
pub struct ConsoleViewState {
    pub engine: LayoutEngine,
    /// Rendering mirror of the grid
    pub scene: ConsoleScene,
    pub selected: Option<ElementId>,
    /// Keep the newest entries in view
    pub follow: bool,
    /// First visible column, in cells
    pub scroll_x: u32,
    /// First visible row
    pub scroll_y: usize,
    /// Viewport width (for scroll calculations)
    pub viewport_width: u16,
    /// Viewport height (for scroll calculations)
    pub viewport_height: u16,
    activation: ActivationTracker,
}

impl ConsoleViewState {
    pub fn new(engine: LayoutEngine, double_activation_window: Duration) -> Self {
        Self {
            engine,
            scene: ConsoleScene::new(),
            selected: None,
            follow: true,
            scroll_x: 0,
            scroll_y: 0,
            viewport_width: 80, // Default, will be updated by the view
            viewport_height: 20,
            activation: ActivationTracker::new(double_activation_window),
        }
    }

    /// One frame: finish last frame's placements and drain the next event.
    ///
    /// Returns the number of layout commands applied.
    pub fn tick(&mut self, measurer: &impl Measurer) -> usize {
        let commands = self.engine.tick(measurer);
        if commands.contains(&LayoutCommand::Cleared) {
            // A fresh run reset the engine
            self.reset_view();
        }
        self.apply(&commands);
        commands.len()
    }

    /// Apply layout commands to the scene
    pub fn apply(&mut self, commands: &[LayoutCommand]) {
        for command in commands {
            log::trace!("Layout command: {:?}", command);
        }
        self.scene.apply_all(commands);
        if self.follow {
            self.scroll_to_end();
        }
    }

    /// Detail of the selected entry
    pub fn selected_detail(&self) -> Option<EntryDetail> {
        self.selected.and_then(|id| self.engine.detail(id))
    }

    /// Handle an action and return any events for the parent application.
    pub fn handle_action(&mut self, action: ConsoleAction, now: Instant) -> Vec<ConsoleEvent> {
        match action {
            ConsoleAction::SelectLeft => self.select_horizontal(false),
            ConsoleAction::SelectRight => self.select_horizontal(true),
            ConsoleAction::SelectUp => self.select_vertical(false),
            ConsoleAction::SelectDown => self.select_vertical(true),
            ConsoleAction::SelectFirst => {
                let first = self.scene.visible_entries(0).first().map(|(_, e)| e.id);
                self.select_opt(first)
            }
            ConsoleAction::SelectLast => {
                let events = self.select_opt(self.scene.last_entry());
                self.follow = true;
                events
            }
            ConsoleAction::Select(id) => self.select_opt(Some(id)),

            ConsoleAction::Activate => self.activate(now),
            ConsoleAction::ToggleFold => {
                let group = self.selected.and_then(|id| self.fold_target(id));
                match group {
                    Some(group) => self.toggle_group(group),
                    None => Vec::new(),
                }
            }

            ConsoleAction::ScrollLeft => {
                self.follow = false;
                self.scroll_x = self.scroll_x.saturating_sub(SCROLL_STEP);
                Vec::new()
            }
            ConsoleAction::ScrollRight => {
                self.follow = false;
                let max = self
                    .scene
                    .width()
                    .saturating_sub(u32::from(self.viewport_width));
                self.scroll_x = (self.scroll_x + SCROLL_STEP).min(max);
                Vec::new()
            }

            ConsoleAction::Clear => {
                let commands = self.engine.clear();
                self.reset_view();
                self.scene.apply_all(&commands);
                vec![ConsoleEvent::Cleared]
            }
            ConsoleAction::ToggleCancel => {
                let cancelled = !self.engine.is_cancelled();
                self.engine.set_cancelled(cancelled);
                log::info!("Visual logs {}", if cancelled { "cancelled" } else { "resumed" });
                vec![ConsoleEvent::CancelToggled { cancelled }]
            }
            ConsoleAction::TogglePause => {
                let paused = !self.engine.is_paused();
                self.engine.set_paused(paused);
                log::info!("Visual logs {}", if paused { "paused" } else { "unpaused" });
                vec![ConsoleEvent::PauseToggled { paused }]
            }

            ConsoleAction::SetViewport { width, height } => {
                self.set_viewport(width, height);
                Vec::new()
            }
        }
    }

    fn reset_view(&mut self) {
        self.selected = None;
        self.follow = true;
        self.scroll_x = 0;
        self.scroll_y = 0;
        self.activation.reset();
    }

    /// Update the viewport, keeping the newest entries in view when following
    pub(crate) fn set_viewport(&mut self, width: u16, height: u16) {
        if (width, height) == (self.viewport_width, self.viewport_height) {
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        if self.follow {
            self.scroll_to_end();
        }
    }

    fn activate(&mut self, now: Instant) -> Vec<ConsoleEvent> {
        let Some(selected) = self.selected else {
            return self.select_opt(self.scene.last_entry());
        };

        if self.activation.register(selected, now) {
            if let Some(group) = self.engine.group_of_element(selected) {
                return self.toggle_group(group);
            }
        }

        vec![ConsoleEvent::SelectionChanged { element: selected }]
    }

    /// The group a fold request on `element` applies to: the group it opens,
    /// or else the group it sits in
    fn fold_target(&self, element: ElementId) -> Option<GroupIndex> {
        self.engine.group_of_element(element).or_else(|| {
            self.engine
                .grid()
                .element(element)
                .and_then(|e| e.parent)
        })
    }

    fn toggle_group(&mut self, group: GroupIndex) -> Vec<ConsoleEvent> {
        let commands = self.engine.toggle_fold(group);
        self.apply(&commands);

        let Some(group) = self.engine.group(group) else {
            return Vec::new();
        };
        let (group_id, folded, button) = (group.id.clone(), group.is_folded, group.element);

        // Selection never stays on something hidden
        let selection_hidden = self
            .selected
            .is_some_and(|id| !self.scene.element(id).is_some_and(|e| e.visible));
        let mut events = Vec::new();
        if selection_hidden {
            events.extend(self.select_opt(Some(button)));
        }

        events.push(ConsoleEvent::FoldToggled { group_id, folded });
        events
    }

    fn select_horizontal(&mut self, forward: bool) -> Vec<ConsoleEvent> {
        let Some((selected, row)) = self.current() else {
            return self.select_opt(self.scene.last_entry());
        };

        let entries = self.scene.visible_entries(row);
        let Some(pos) = entries.iter().position(|(_, e)| e.id == selected) else {
            return Vec::new();
        };
        let next = if forward {
            entries.get(pos + 1)
        } else {
            pos.checked_sub(1).and_then(|p| entries.get(p))
        };
        let next = next.map(|(_, e)| e.id);
        self.select_opt(next)
    }

    fn select_vertical(&mut self, down: bool) -> Vec<ConsoleEvent> {
        let Some((selected, row)) = self.current() else {
            return self.select_opt(self.scene.last_entry());
        };
        let Some(x) = self.scene.flow_x(selected) else {
            return Vec::new();
        };
        let width = self.scene.element(selected).map_or(0, |e| e.width);
        let center = x + width / 2;

        let rows: Vec<usize> = if down {
            (row + 1..self.scene.row_count()).collect()
        } else {
            (0..row).rev().collect()
        };

        // Nearest row with anything visible, nearest entry on it
        let target = rows.into_iter().find_map(|r| {
            self.scene
                .visible_entries(r)
                .into_iter()
                .min_by_key(|(ex, e)| distance(center, *ex, e.width))
                .map(|(_, e)| e.id)
        });
        self.select_opt(target)
    }

    fn current(&self) -> Option<(ElementId, usize)> {
        let selected = self.selected?;
        Some((selected, self.scene.row_of(selected)?))
    }

    fn select_opt(&mut self, element: Option<ElementId>) -> Vec<ConsoleEvent> {
        let Some(element) = element else {
            return Vec::new();
        };
        let visible_entry = self
            .scene
            .element(element)
            .is_some_and(|e| e.visible && e.event().is_some());
        if !visible_entry {
            return Vec::new();
        }

        self.selected = Some(element);
        self.follow = false;
        self.scroll_to(element);
        vec![ConsoleEvent::SelectionChanged { element }]
    }

    fn scroll_to(&mut self, element: ElementId) {
        let (Some(x), Some(row)) = (self.scene.flow_x(element), self.scene.row_of(element)) else {
            return;
        };
        let width = self.scene.element(element).map_or(0, |e| e.width);
        let view_width = u32::from(self.viewport_width);
        let view_height = usize::from(self.viewport_height).max(1);

        if x < self.scroll_x || width > view_width {
            self.scroll_x = x;
        } else if x + width > self.scroll_x + view_width {
            self.scroll_x = x + width - view_width;
        }

        if row < self.scroll_y {
            self.scroll_y = row;
        } else if row >= self.scroll_y + view_height {
            self.scroll_y = row + 1 - view_height;
        }
    }

    fn scroll_to_end(&mut self) {
        self.scroll_x = self
            .scene
            .width()
            .saturating_sub(u32::from(self.viewport_width));
        self.scroll_y = self
            .scene
            .row_count()
            .saturating_sub(usize::from(self.viewport_height));
    }
}

/// Horizontal distance from `x` to the span `[start, start + width)`
fn distance(x: u32, start: u32, width: u32) -> u32 {
    if x < start {
        start - x
    } else if x >= start + width {
        x - (start + width) + 1
    } else {
        0
    }
}
