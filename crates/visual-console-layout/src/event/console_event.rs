//! Events emitted by the console view for the parent application to handle.

use crate::model::ElementId;

/// Events emitted by [`crate::ConsoleViewState::handle_action`].
///
/// The console view only changes its own state; anything beyond that
/// (status bar text, opening a file at a trace location) is up to the
/// parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A different entry is now selected
    SelectionChanged { element: ElementId },

    /// A group was folded or unfolded
    FoldToggled { group_id: String, folded: bool },

    /// The console was wiped
    Cleared,

    /// The cancel flag was flipped
    CancelToggled { cancelled: bool },

    /// Draining was paused or resumed
    PauseToggled { paused: bool },
}
