//! State management for the console: the layout engine, the fold projector
//! and the interactive view state.

mod engine;
mod fold;
mod selection;
mod view_state;

pub use engine::LayoutEngine;
pub use selection::{ActivationTracker, EntryDetail};
pub use view_state::ConsoleViewState;
