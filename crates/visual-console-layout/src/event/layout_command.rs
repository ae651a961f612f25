//! Placement commands for a row-based rendering host.

use crate::model::ElementId;
use std::sync::Arc;
use visual_console_model::LogEvent;

/// A single instruction for the rendering collaborator.
///
/// The engine owns the layout; a host only has to replay these commands in
/// order onto a set of left-to-right flowing rows to show exactly what the
/// engine computed. Widths are in cells.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    /// Append an empty row at the bottom
    CreateRow { row: usize },

    /// Append an entry button to the end of a row.
    ///
    /// The entry is preceded by a zero-width placeholder with id
    /// `preceding_placeholder`. Both start out hidden-and-unmeasured (entry)
    /// and empty (placeholder) until the width pass sizes and reveals them.
    PlaceElement {
        row: usize,
        element: ElementId,
        event: Arc<LogEvent>,
        preceding_placeholder: ElementId,
    },

    /// Resize an element or placeholder
    SetElementWidth { element: ElementId, width: u32 },

    /// Show or hide an element or placeholder
    SetVisibility { element: ElementId, visible: bool },

    /// Insert a new placeholder in front of `before`
    InsertPlaceholder {
        row: usize,
        before: ElementId,
        placeholder: ElementId,
        width: u32,
    },

    /// Mark a group button as folded (dimmed, fold marker shown) or unfolded
    SetFolded { element: ElementId, folded: bool },

    /// Remove everything; row 0 is recreated by a following `CreateRow`
    Cleared,
}
