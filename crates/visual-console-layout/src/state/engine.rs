//! The grouping/nesting layout engine.

use crate::event::LayoutCommand;
use crate::handle::{Queued, SharedState};
use crate::model::{Element, ElementId, ElementKind, Grid, Group, GroupIndex};
use crate::traits::Measurer;
use crate::warning::ConsoleWarning;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use visual_console_model::{EventKind, LogEvent};

/// An entry placed by `drain` and waiting for its width pass
#[derive(Debug, Clone, Copy)]
struct Provisional {
    element: ElementId,
    gap: ElementId,
}

/// Consumes queued events one per tick and maintains the grid.
///
/// All methods run on the UI thread. Producers only ever touch the queue
/// through a [`crate::ConsoleHandle`].
///
/// Placement is a two-phase commit: [`drain`](Self::drain) places an entry
/// hidden and unmeasured, [`finalize_widths`](Self::finalize_widths) measures
/// it once the host has laid it out, fills the gap in front of it, widens the
/// active groups and reveals it.
#[derive(Debug)]
pub struct LayoutEngine {
    receiver: Receiver<Queued>,
    shared: Arc<SharedState>,
    /// Queue is left alone while paused
    paused: bool,
    pub(crate) grid: Grid,
    pub(crate) groups: Vec<Group>,
    /// Open groups, outer to inner
    active: Vec<GroupIndex>,
    provisional: Vec<Provisional>,
}

impl LayoutEngine {
    pub(crate) fn new(receiver: Receiver<Queued>, shared: Arc<SharedState>) -> Self {
        Self {
            receiver,
            shared,
            paused: false,
            grid: Grid::new(),
            groups: Vec::new(),
            active: Vec::new(),
            provisional: Vec::new(),
        }
    }

    // === Queue ===

    /// Process exactly one queued event, oldest first.
    ///
    /// Returns `None` when the queue is empty.
    pub fn drain(&mut self) -> Option<Vec<LayoutCommand>> {
        let queued = self.receiver.try_recv().ok()?;
        self.shared.dequeued(1);

        let mut commands = Vec::new();
        match queued {
            Queued::Event(event) => self.process(event, &mut commands),
            Queued::Reset => {
                log::debug!("Fresh run, resetting the console");
                commands.extend(self.reset());
            }
        }
        Some(commands)
    }

    /// One host frame: finish the entries placed last frame, then drain the
    /// next event unless paused.
    pub fn tick(&mut self, measurer: &impl Measurer) -> Vec<LayoutCommand> {
        let mut commands = self.finalize_widths(measurer);
        if self.paused {
            return commands;
        }
        if let Some(drained) = self.drain() {
            commands.extend(drained);
        }
        commands
    }

    /// Number of queued events not yet drained
    pub fn pending(&self) -> usize {
        self.shared.queued()
    }

    /// Whether entries are waiting for their width pass
    pub fn has_provisional(&self) -> bool {
        !self.provisional.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.shared.set_cancelled(cancelled);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop or resume draining. Producers keep queuing while paused and
    /// nothing is dropped.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Warnings recorded so far, oldest first
    pub fn warnings(&self) -> Vec<ConsoleWarning> {
        self.shared.warnings()
    }

    /// Wipe the grid, the active stack and the queue, then recreate row 0.
    pub fn clear(&mut self) -> Vec<LayoutCommand> {
        let dropped = self.receiver.try_iter().count();
        self.shared.dequeued(dropped);
        log::debug!("Console cleared ({} queued events dropped)", dropped);
        self.reset()
    }

    /// Wipe the grid and the active stack, keeping the queue
    fn reset(&mut self) -> Vec<LayoutCommand> {
        self.shared.clear_warnings();

        self.grid = Grid::new();
        self.groups.clear();
        self.active.clear();
        self.provisional.clear();

        vec![LayoutCommand::Cleared, LayoutCommand::CreateRow { row: 0 }]
    }

    // === Queries ===

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: GroupIndex) -> Option<&Group> {
        self.groups.get(index.0)
    }

    /// Open groups, outer to inner
    pub fn active_groups(&self) -> impl Iterator<Item = &Group> {
        self.active.iter().filter_map(|g| self.groups.get(g.0))
    }

    /// The open group with this id
    pub fn find_active(&self, id: &str) -> Option<GroupIndex> {
        self.active
            .iter()
            .rev()
            .copied()
            .find(|g| self.groups[g.0].id == id)
    }

    /// The most recently opened group with this id, open or closed
    pub fn find_group(&self, id: &str) -> Option<GroupIndex> {
        self.groups
            .iter()
            .rposition(|g| g.id == id)
            .map(GroupIndex)
    }

    /// The group opened by this element, if it is a group button
    pub fn group_of_element(&self, element: ElementId) -> Option<GroupIndex> {
        self.grid.element(element).and_then(Element::opened_group)
    }

    fn innermost_active(&self) -> Option<GroupIndex> {
        self.active.last().copied()
    }

    // === Placement ===

    fn process(&mut self, event: LogEvent, commands: &mut Vec<LayoutCommand>) {
        if let EventKind::CloseGroup { id } = &event.kind {
            self.close_group(id);
            return;
        }

        if self.is_cancelled() {
            log::trace!("Console cancelled, dropping '{}'", event.text);
            return;
        }

        if let Some(id) = event.group_id() {
            if self.find_active(id).is_some() {
                self.shared
                    .warn(ConsoleWarning::DuplicateGroupId(id.to_string()));
                return;
            }
        }

        self.place(event, commands);
    }

    fn close_group(&mut self, id: &str) {
        let Some(index) = self.find_active(id) else {
            self.shared
                .warn(ConsoleWarning::UnknownGroupClose(id.to_string()));
            return;
        };

        self.groups[index.0].is_active = false;
        let groups = &self.groups;
        self.active.retain(|g| groups[g.0].is_active);
        log::debug!("Closed group '{}' ({} still open)", id, self.active.len());
    }

    fn place(&mut self, event: LogEvent, commands: &mut Vec<LayoutCommand>) {
        let parent = self.innermost_active();
        let row = parent.map_or(0, |g| self.groups[g.0].child_row_index);
        let concealed = parent.is_some_and(|g| self.groups[g.0].children_concealed);

        for created in self.grid.ensure_row(row) {
            commands.push(LayoutCommand::CreateRow { row: created });
        }

        let opens = event.group_id().map(str::to_string);
        let group_index = opens.as_ref().map(|_| GroupIndex(self.groups.len()));
        let event = Arc::new(event);

        let gap = self.grid.push(row, ElementKind::Gap, parent, true);
        let element = self.grid.push(
            row,
            ElementKind::Entry {
                event: Arc::clone(&event),
                group: group_index,
            },
            parent,
            false,
        );

        for index in self.active.clone() {
            if self.groups[index.0].child_row_index == row {
                self.groups[index.0].children.push(element);
            }
        }

        commands.push(LayoutCommand::PlaceElement {
            row,
            element,
            event: Arc::clone(&event),
            preceding_placeholder: gap,
        });

        if let (Some(id), Some(index)) = (opens, group_index) {
            let mut group = Group::new(id, element, row);
            group.parent = parent;
            group.children_concealed = concealed;
            let child_row = group.child_row_index;
            self.groups.push(group);
            self.active.push(index);

            for created in self.grid.ensure_row(child_row) {
                commands.push(LayoutCommand::CreateRow { row: created });
            }
            log::debug!(
                "Opened group '{}' on row {} ({} open)",
                self.groups[index.0].id,
                row,
                self.active.len()
            );
        }

        self.provisional.push(Provisional { element, gap });
    }

    // === Width pass ===

    /// Second phase of placement. Call once the host has laid out the
    /// entries returned by the last `drain`.
    pub fn finalize_widths(&mut self, measurer: &impl Measurer) -> Vec<LayoutCommand> {
        let mut commands = Vec::new();
        for provisional in std::mem::take(&mut self.provisional) {
            self.finalize(provisional, measurer, &mut commands);
        }
        commands
    }

    fn finalize(
        &mut self,
        provisional: Provisional,
        measurer: &impl Measurer,
        commands: &mut Vec<LayoutCommand>,
    ) {
        let Provisional { element, gap } = provisional;
        let Some((width, parent)) = self
            .grid
            .element(element)
            .and_then(|e| e.event().map(|event| (measurer.measure(event), e.parent)))
        else {
            return;
        };

        // Left edge is max(row end, anchor); whatever lies between is gap
        let anchor = match parent {
            Some(g) => self.grid.x_of(self.groups[g.0].element),
            None => self.grid.farthest_right_edge(),
        };
        let gap_width = anchor.saturating_sub(self.grid.x_of(element));
        if gap_width > 0 {
            self.set_width(gap, gap_width, commands);
        }

        if let Some(e) = self.grid.element_mut(element) {
            e.natural_width = width;
            e.measured = true;
        }
        self.set_width(element, width, commands);
        if let Some(index) = self.group_of_element(element) {
            self.groups[index.0].rendered_width = width;
        }

        let concealed = parent.is_some_and(|g| self.groups[g.0].children_concealed);
        match parent {
            Some(g) if concealed => self.ensure_placeholder(g, commands),
            _ => self.set_visible(element, true, commands),
        }

        self.update_group_widths(commands);
        self.resize_placeholders(commands);
    }

    /// Every active group's button spans from its own left edge to the
    /// farthest right edge of the grid
    fn update_group_widths(&mut self, commands: &mut Vec<LayoutCommand>) {
        let farthest = self.grid.farthest_right_edge();

        for index in self.active.clone() {
            let button = self.groups[index.0].element;
            let Some(natural) = self
                .grid
                .element(button)
                .filter(|e| e.measured)
                .map(|e| e.natural_width)
            else {
                continue;
            };

            let left = self.grid.x_of(button);
            let width = natural.max(farthest.saturating_sub(left));
            self.set_width(button, width, commands);
            self.groups[index.0].rendered_width = width;
        }
    }

    /// Keep shown placeholders exactly as wide as the children they stand in
    /// for. Children keep growing while a concealed group is still open.
    fn resize_placeholders(&mut self, commands: &mut Vec<LayoutCommand>) {
        let shown: Vec<(GroupIndex, ElementId)> = self
            .groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.placeholder.map(|p| (GroupIndex(i), p)))
            .filter(|(_, p)| self.is_visible(*p))
            .collect();

        for (index, placeholder) in shown {
            let width = self.children_width(index);
            self.set_width(placeholder, width, commands);
        }
    }

    // === Element helpers shared with the fold projector ===

    /// Summed width of a group's direct children
    pub(crate) fn children_width(&self, index: GroupIndex) -> u32 {
        self.groups[index.0]
            .children
            .iter()
            .filter_map(|c| self.grid.element(*c))
            .map(Element::layout_width)
            .sum()
    }

    pub(crate) fn is_visible(&self, element: ElementId) -> bool {
        self.grid.element(element).is_some_and(|e| e.visible)
    }

    pub(crate) fn set_width(
        &mut self,
        element: ElementId,
        width: u32,
        commands: &mut Vec<LayoutCommand>,
    ) {
        let Some(e) = self.grid.element_mut(element) else {
            return;
        };
        if e.width != width {
            e.width = width;
            commands.push(LayoutCommand::SetElementWidth { element, width });
        }
    }

    pub(crate) fn set_visible(
        &mut self,
        element: ElementId,
        visible: bool,
        commands: &mut Vec<LayoutCommand>,
    ) {
        let Some(e) = self.grid.element_mut(element) else {
            return;
        };
        if e.visible != visible {
            e.visible = visible;
            commands.push(LayoutCommand::SetVisibility { element, visible });
        }
    }

    /// Show the group's children placeholder, creating it in front of the
    /// first child on first use and sizing it to the children
    pub(crate) fn ensure_placeholder(
        &mut self,
        index: GroupIndex,
        commands: &mut Vec<LayoutCommand>,
    ) {
        let width = self.children_width(index);

        match self.groups[index.0].placeholder {
            Some(placeholder) => {
                self.set_width(placeholder, width, commands);
                self.set_visible(placeholder, true, commands);
            }
            None => {
                let Some(first) = self.groups[index.0].first_child() else {
                    return;
                };
                let row = self.groups[index.0].child_row_index;
                let placeholder = self.grid.insert_before(
                    row,
                    first,
                    ElementKind::FoldPlaceholder { group: index },
                    true,
                );
                if let Some(e) = self.grid.element_mut(placeholder) {
                    e.width = width;
                    e.measured = true;
                }
                self.groups[index.0].placeholder = Some(placeholder);
                commands.push(LayoutCommand::InsertPlaceholder {
                    row,
                    before: first,
                    placeholder,
                    width,
                });
            }
        }
    }
}
