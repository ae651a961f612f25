//! Host-side mirror of the grid, built only from layout commands.
//!
//! The console view renders from this rather than from the engine, the same
//! way a flow-layout toolkit would only ever see the command stream.

use super::ElementId;
use crate::event::LayoutCommand;
use std::collections::HashMap;
use std::sync::Arc;
use visual_console_model::LogEvent;

/// What a scene element shows
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    /// An entry button
    Entry { event: Arc<LogEvent>, folded: bool },
    /// Invisible space
    Spacer,
}

/// One element of a scene row
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub id: ElementId,
    pub item: SceneItem,
    pub width: u32,
    pub visible: bool,
}

impl SceneElement {
    pub fn event(&self) -> Option<&LogEvent> {
        match &self.item {
            SceneItem::Entry { event, .. } => Some(event),
            SceneItem::Spacer => None,
        }
    }

    pub fn is_folded(&self) -> bool {
        matches!(self.item, SceneItem::Entry { folded: true, .. })
    }

    fn spacer(id: ElementId, width: u32) -> Self {
        Self {
            id,
            item: SceneItem::Spacer,
            width,
            visible: true,
        }
    }
}

/// Rows of elements that flow left to right, hidden elements taking no space
#[derive(Debug, Clone)]
pub struct ConsoleScene {
    rows: Vec<Vec<SceneElement>>,
    /// Row of every element
    index: HashMap<ElementId, usize>,
}

impl Default for ConsoleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleScene {
    /// A scene with the empty row 0, matching a fresh engine
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
            index: HashMap::new(),
        }
    }

    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a LayoutCommand>) {
        for command in commands {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: &LayoutCommand) {
        match command {
            LayoutCommand::CreateRow { row } => self.ensure_row(*row),
            LayoutCommand::PlaceElement {
                row,
                element,
                event,
                preceding_placeholder,
            } => {
                self.ensure_row(*row);
                self.rows[*row].push(SceneElement::spacer(*preceding_placeholder, 0));
                self.rows[*row].push(SceneElement {
                    id: *element,
                    item: SceneItem::Entry {
                        event: Arc::clone(event),
                        folded: false,
                    },
                    width: 0,
                    visible: false,
                });
                self.index.insert(*preceding_placeholder, *row);
                self.index.insert(*element, *row);
            }
            LayoutCommand::SetElementWidth { element, width } => {
                if let Some(e) = self.element_mut(*element) {
                    e.width = *width;
                }
            }
            LayoutCommand::SetVisibility { element, visible } => {
                if let Some(e) = self.element_mut(*element) {
                    e.visible = *visible;
                }
            }
            LayoutCommand::InsertPlaceholder {
                row,
                before,
                placeholder,
                width,
            } => {
                self.ensure_row(*row);
                let elements = &mut self.rows[*row];
                let spacer = SceneElement::spacer(*placeholder, *width);
                match elements.iter().position(|e| e.id == *before) {
                    Some(pos) => elements.insert(pos, spacer),
                    None => elements.push(spacer),
                }
                self.index.insert(*placeholder, *row);
            }
            LayoutCommand::SetFolded { element, folded } => {
                if let Some(SceneElement {
                    item: SceneItem::Entry { folded: f, .. },
                    ..
                }) = self.element_mut(*element)
                {
                    *f = *folded;
                }
            }
            LayoutCommand::Cleared => {
                self.rows.clear();
                self.index.clear();
            }
        }
    }

    fn ensure_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: usize) -> &[SceneElement] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row an element lives on
    pub fn row_of(&self, id: ElementId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        let row = self.row_of(id)?;
        self.rows[row].iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        let row = self.row_of(id)?;
        self.rows[row].iter_mut().find(|e| e.id == id)
    }

    /// Visible entries of a row with their flow x, left to right
    pub fn visible_entries(&self, row: usize) -> Vec<(u32, &SceneElement)> {
        let mut x = 0;
        let mut entries = Vec::new();
        for element in self.row(row) {
            if !element.visible {
                continue;
            }
            if element.event().is_some() {
                entries.push((x, element));
            }
            x += element.width;
        }
        entries
    }

    /// Flow x of a visible element
    pub fn flow_x(&self, id: ElementId) -> Option<u32> {
        let row = self.row_of(id)?;
        let mut x = 0;
        for element in self.row(row) {
            if element.id == id {
                return element.visible.then_some(x);
            }
            if element.visible {
                x += element.width;
            }
        }
        None
    }

    /// Widest row, in cells
    pub fn width(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|e| e.visible).map(|e| e.width).sum())
            .max()
            .unwrap_or(0)
    }

    /// The most recently placed visible entry
    pub fn last_entry(&self) -> Option<ElementId> {
        self.rows
            .iter()
            .flatten()
            .filter(|e| e.visible && e.event().is_some())
            .map(|e| e.id)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visual_console_model::{Palette, Severity};

    fn place(scene: &mut ConsoleScene, row: usize, element: usize, text: &str) {
        scene.apply(&LayoutCommand::PlaceElement {
            row,
            element: ElementId(element),
            event: Arc::new(Palette::default().plain(text, Severity::Info)),
            preceding_placeholder: ElementId(element - 1),
        });
    }

    #[test]
    fn test_placed_entries_start_hidden() {
        let mut scene = ConsoleScene::new();
        place(&mut scene, 0, 1, "a");

        assert_eq!(scene.row(0).len(), 2);
        assert!(scene.visible_entries(0).is_empty());
        assert_eq!(scene.flow_x(ElementId(1)), None);
    }

    #[test]
    fn test_flow_positions_skip_hidden_elements() {
        let mut scene = ConsoleScene::new();
        place(&mut scene, 0, 1, "a");
        place(&mut scene, 0, 3, "b");
        scene.apply_all(&[
            LayoutCommand::SetElementWidth {
                element: ElementId(1),
                width: 4,
            },
            LayoutCommand::SetElementWidth {
                element: ElementId(3),
                width: 2,
            },
            LayoutCommand::SetVisibility {
                element: ElementId(3),
                visible: true,
            },
        ]);

        assert_eq!(scene.flow_x(ElementId(3)), Some(0));
        scene.apply(&LayoutCommand::SetVisibility {
            element: ElementId(1),
            visible: true,
        });
        assert_eq!(scene.flow_x(ElementId(3)), Some(4));
        assert_eq!(scene.width(), 6);
        assert_eq!(scene.last_entry(), Some(ElementId(3)));
    }

    #[test]
    fn test_insert_placeholder_and_clear() {
        let mut scene = ConsoleScene::new();
        place(&mut scene, 1, 1, "a");
        scene.apply(&LayoutCommand::InsertPlaceholder {
            row: 1,
            before: ElementId(1),
            placeholder: ElementId(7),
            width: 3,
        });
        scene.apply(&LayoutCommand::SetFolded {
            element: ElementId(1),
            folded: true,
        });

        let ids: Vec<_> = scene.row(1).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![ElementId(0), ElementId(7), ElementId(1)]);
        assert!(scene.element(ElementId(1)).unwrap().is_folded());

        scene.apply(&LayoutCommand::Cleared);
        scene.apply(&LayoutCommand::CreateRow { row: 0 });
        assert_eq!(scene.row_count(), 1);
        assert!(scene.element(ElementId(1)).is_none());
    }
}
