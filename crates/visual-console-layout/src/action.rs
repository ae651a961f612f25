//! Console Actions
//!
//! Tagged actions that the console view can process. The orchestrating
//! application maps its key (or mouse) events to these and dispatches them to
//! the view state.

/// Actions that can be performed on the console view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    // === Selection ===
    /// Select the previous visible entry on the same row
    SelectLeft,
    /// Select the next visible entry on the same row
    SelectRight,
    /// Select the closest entry on the row above
    SelectUp,
    /// Select the closest entry on the row below
    SelectDown,
    /// Select the first entry of row 0
    SelectFirst,
    /// Select the most recent entry and follow new ones
    SelectLast,
    /// Select a specific element (e.g. from a mouse click)
    Select(crate::model::ElementId),

    /// Activate the selected entry. Two activations within the double
    /// activation window fold or unfold a group.
    Activate,
    /// Fold or unfold the selected group directly
    ToggleFold,

    // === Scrolling ===
    /// Scroll the grid left
    ScrollLeft,
    /// Scroll the grid right
    ScrollRight,

    // === Console ===
    /// Wipe the console
    Clear,
    /// Flip the cancel flag
    ToggleCancel,
    /// Stop or resume draining the queue without dropping anything
    TogglePause,

    // === Viewport ===
    /// Set the viewport dimensions (for scroll calculations)
    SetViewport { width: u16, height: u16 },
}

impl ConsoleAction {
    /// Check if this action moves the selection
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            ConsoleAction::SelectLeft
                | ConsoleAction::SelectRight
                | ConsoleAction::SelectUp
                | ConsoleAction::SelectDown
                | ConsoleAction::SelectFirst
                | ConsoleAction::SelectLast
                | ConsoleAction::Select(_)
        )
    }

    /// Check if this action is a scroll action
    pub fn is_scroll(&self) -> bool {
        matches!(self, ConsoleAction::ScrollLeft | ConsoleAction::ScrollRight)
    }
}
