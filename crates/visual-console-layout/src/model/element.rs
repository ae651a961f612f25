//! Elements placed in the console grid.

use super::GroupIndex;
use std::sync::Arc;
use visual_console_model::LogEvent;

/// Stable handle of a placed element. Only valid until the next `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// What a grid element stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A log entry button. `group` is set when the entry opens a group.
    Entry {
        event: Arc<LogEvent>,
        group: Option<GroupIndex>,
    },

    /// Spacer in front of an entry that fills the gap up to its anchor.
    Gap,

    /// Spacer standing in for the concealed children of a group.
    FoldPlaceholder { group: GroupIndex },
}

/// A single element of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    /// Row the element lives on
    pub row: usize,
    pub kind: ElementKind,
    /// Group whose children row holds this element
    pub parent: Option<GroupIndex>,
    /// Current width in cells
    pub width: u32,
    /// Measured width of the label alone (group buttons may be wider)
    pub natural_width: u32,
    /// Whether the measurer has seen this element
    pub measured: bool,
    pub visible: bool,
}

impl Element {
    pub fn is_entry(&self) -> bool {
        matches!(self.kind, ElementKind::Entry { .. })
    }

    pub fn is_fold_placeholder(&self) -> bool {
        matches!(self.kind, ElementKind::FoldPlaceholder { .. })
    }

    /// The log event behind an entry
    pub fn event(&self) -> Option<&LogEvent> {
        match &self.kind {
            ElementKind::Entry { event, .. } => Some(event),
            _ => None,
        }
    }

    /// Group opened by this entry
    pub fn opened_group(&self) -> Option<GroupIndex> {
        match self.kind {
            ElementKind::Entry { group, .. } => group,
            _ => None,
        }
    }

    /// Width the element contributes to the unfolded layout of its row.
    ///
    /// Fold placeholders only stand in for hidden elements, so they never
    /// add to it.
    pub fn layout_width(&self) -> u32 {
        if self.is_fold_placeholder() {
            0
        } else {
            self.width
        }
    }
}
