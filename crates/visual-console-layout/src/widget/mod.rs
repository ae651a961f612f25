//! Ratatui widgets for the console.

mod console_view;
mod detail_pane;
mod label;

pub use console_view::{ConsoleView, FooterHint};
pub use detail_pane::DetailPane;
pub use label::{entry_label, entry_style, CellMeasurer};
