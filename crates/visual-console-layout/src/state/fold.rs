//! Fold/unfold projection over a group's subtree.
//!
//! Folding never removes anything from the grid. Children are hidden and one
//! placeholder per concealed children row stands in for them, so everything
//! to their right keeps its position. Layout widths are independent of
//! visibility, which makes fold followed by unfold an exact round trip.

use super::LayoutEngine;
use crate::event::LayoutCommand;
use crate::model::GroupIndex;

impl LayoutEngine {
    /// Fold the group if it is unfolded, unfold it otherwise.
    pub fn toggle_fold(&mut self, index: GroupIndex) -> Vec<LayoutCommand> {
        match self.group(index) {
            Some(group) if group.is_folded => self.unfold(index),
            Some(_) => self.fold(index),
            None => Vec::new(),
        }
    }

    /// Hide the group's descendants behind a placeholder. The group's own
    /// button stays, marked as folded.
    pub fn fold(&mut self, index: GroupIndex) -> Vec<LayoutCommand> {
        let mut commands = Vec::new();
        let Some(group) = self.groups.get_mut(index.0) else {
            return commands;
        };
        if group.is_folded {
            return commands;
        }

        group.is_folded = true;
        let button = group.element;
        // Already hidden by an ancestor: the flag is all that changes
        let already_concealed = group.children_concealed;

        commands.push(LayoutCommand::SetFolded {
            element: button,
            folded: true,
        });
        if !already_concealed {
            self.conceal(index, &mut commands);
        }

        log::debug!(
            "Folded group '{}' ({} children)",
            self.groups[index.0].id,
            self.groups[index.0].children.len()
        );
        commands
    }

    /// Show the group's children again. Folded descendants stay folded.
    pub fn unfold(&mut self, index: GroupIndex) -> Vec<LayoutCommand> {
        let mut commands = Vec::new();
        let Some(group) = self.groups.get_mut(index.0) else {
            return commands;
        };
        if !group.is_folded {
            return commands;
        }

        group.is_folded = false;
        let button = group.element;
        let parent = group.parent;

        commands.push(LayoutCommand::SetFolded {
            element: button,
            folded: false,
        });

        // Inside a folded ancestor the children stay hidden until that
        // ancestor unfolds
        let hidden_by_ancestor = parent.is_some_and(|p| self.groups[p.0].children_concealed);
        if !hidden_by_ancestor {
            self.reveal(index, &mut commands);
        }

        log::debug!("Unfolded group '{}'", self.groups[index.0].id);
        commands
    }

    fn conceal(&mut self, index: GroupIndex, commands: &mut Vec<LayoutCommand>) {
        self.groups[index.0].children_concealed = true;
        // Sized from the children's widths before any of them is hidden
        self.ensure_placeholder(index, commands);

        for child in self.groups[index.0].children.clone() {
            self.set_visible(child, false, commands);

            if let Some(child_group) = self.group_of_element(child) {
                if !self.groups[child_group.0].is_folded {
                    self.conceal(child_group, commands);
                }
            }
        }
    }

    fn reveal(&mut self, index: GroupIndex, commands: &mut Vec<LayoutCommand>) {
        self.groups[index.0].children_concealed = false;

        for child in self.groups[index.0].children.clone() {
            // Unmeasured entries are revealed by their width pass
            let measured = self.grid.element(child).is_some_and(|e| e.measured);
            if measured {
                self.set_visible(child, true, commands);
            }

            if let Some(child_group) = self.group_of_element(child) {
                if !self.groups[child_group.0].is_folded {
                    self.reveal(child_group, commands);
                }
            }
        }

        if let Some(placeholder) = self.groups[index.0].placeholder {
            self.set_visible(placeholder, false, commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handle::console_with_sink;
    use crate::model::{ElementId, GroupIndex};
    use crate::state::LayoutEngine;
    use crate::traits::NoOpSink;
    use crate::LayoutCommand;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use visual_console_model::{LogEvent, LogStyleSpec, Palette};

    fn char_width(event: &LogEvent) -> u32 {
        event.text.chars().count() as u32
    }

    fn run(engine: &mut LayoutEngine) {
        while engine.pending() > 0 || engine.has_provisional() {
            engine.tick(&char_width);
        }
    }

    fn visible(engine: &LayoutEngine) -> Vec<(ElementId, u32)> {
        engine
            .grid()
            .elements()
            .iter()
            .filter(|e| e.visible)
            .map(|e| (e.id, e.width))
            .collect()
    }

    fn group(engine: &LayoutEngine, id: &str) -> GroupIndex {
        engine.find_group(id).unwrap()
    }

    #[test]
    fn test_fold_emits_folded_marker_and_placeholder() {
        let (handle, mut engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        handle.open_group_default("g1", "start");
        handle.log("aa", &LogStyleSpec::default());
        handle.log("bbb", &LogStyleSpec::default());
        run(&mut engine);

        let g1 = group(&engine, "g1");
        let button = engine.group(g1).unwrap().element;
        let children = engine.group(g1).unwrap().children.clone();
        let commands = engine.fold(g1);

        let placeholder = engine.group(g1).unwrap().placeholder.unwrap();
        assert_eq!(
            commands,
            vec![
                LayoutCommand::SetFolded {
                    element: button,
                    folded: true
                },
                LayoutCommand::InsertPlaceholder {
                    row: 1,
                    before: children[0],
                    placeholder,
                    width: 5
                },
                LayoutCommand::SetVisibility {
                    element: children[0],
                    visible: false
                },
                LayoutCommand::SetVisibility {
                    element: children[1],
                    visible: false
                },
            ]
        );
    }

    #[test]
    fn test_fold_twice_is_a_no_op() {
        let (handle, mut engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        handle.open_group_default("g1", "start");
        handle.log("a", &LogStyleSpec::default());
        run(&mut engine);

        let g1 = group(&engine, "g1");
        assert!(!engine.fold(g1).is_empty());
        assert!(engine.fold(g1).is_empty());
        assert!(engine.toggle_fold(g1).len() > 1);
        assert!(!engine.group(g1).unwrap().is_folded);
    }

    #[test]
    fn test_placeholder_is_reused() {
        let (handle, mut engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        handle.open_group_default("g1", "start");
        handle.log("a", &LogStyleSpec::default());
        run(&mut engine);

        let g1 = group(&engine, "g1");
        engine.fold(g1);
        let first = engine.group(g1).unwrap().placeholder;
        engine.unfold(g1);
        let commands = engine.fold(g1);

        assert_eq!(engine.group(g1).unwrap().placeholder, first);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, LayoutCommand::InsertPlaceholder { .. })));
    }

    #[test]
    fn test_nested_folded_group_stays_folded() {
        let (handle, mut engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        handle.open_group_default("outer", "outer");
        handle.open_group_default("inner", "inner");
        handle.log("deep", &LogStyleSpec::default());
        handle.close_group("inner");
        handle.log("x", &LogStyleSpec::default());
        run(&mut engine);

        let outer = group(&engine, "outer");
        let inner = group(&engine, "inner");
        let deep = engine.group(inner).unwrap().children[0];

        engine.fold(inner);
        let inner_placeholder = engine.group(inner).unwrap().placeholder.unwrap();

        engine.fold(outer);
        assert!(!engine.grid().element(deep).unwrap().visible);
        // The inner placeholder keeps holding row 2 open
        assert!(engine.grid().element(inner_placeholder).unwrap().visible);

        engine.unfold(outer);
        let inner_button = engine.group(inner).unwrap().element;
        assert!(engine.grid().element(inner_button).unwrap().visible);
        assert!(engine.group(inner).unwrap().is_folded);
        assert!(!engine.grid().element(deep).unwrap().visible);
    }

    #[test]
    fn test_fold_recurses_into_unfolded_child_groups() {
        let (handle, mut engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        handle.open_group_default("outer", "outer");
        handle.open_group_default("inner", "inner");
        handle.log("deep", &LogStyleSpec::default());
        run(&mut engine);

        let before = visible(&engine);
        let outer = group(&engine, "outer");
        let inner = group(&engine, "inner");
        engine.fold(outer);

        let deep = engine.group(inner).unwrap().children[0];
        assert!(!engine.grid().element(deep).unwrap().visible);
        assert!(engine.group(inner).unwrap().children_concealed);
        assert!(!engine.group(inner).unwrap().is_folded);

        engine.unfold(outer);
        assert_eq!(visible(&engine), before);
    }

    #[test]
    fn test_entries_arriving_while_folded() {
        let (handle, mut engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        handle.open_group_default("g1", "a-long-group-label");
        handle.log("aa", &LogStyleSpec::default());
        run(&mut engine);

        let g1 = group(&engine, "g1");
        engine.fold(g1);
        handle.log("bbbb", &LogStyleSpec::default());
        run(&mut engine);

        let placeholder = engine.group(g1).unwrap().placeholder.unwrap();
        let new_entry = *engine.group(g1).unwrap().children.last().unwrap();
        assert!(!engine.grid().element(new_entry).unwrap().visible);
        assert_eq!(engine.grid().element(placeholder).unwrap().width, 6);

        engine.unfold(g1);
        assert!(engine.grid().element(new_entry).unwrap().visible);
        assert_eq!(engine.grid().x_of(new_entry), 2);
    }
}
