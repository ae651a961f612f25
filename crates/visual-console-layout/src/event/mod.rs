//! Output of the console: layout commands for the renderer and events for
//! the parent application.

mod console_event;
mod layout_command;

pub use console_event::ConsoleEvent;
pub use layout_command::LayoutCommand;
