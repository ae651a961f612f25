//! # visual-console-layout
//!
//! A grouping/nesting layout engine for visual log entries and a ratatui
//! widget that renders it.
//!
//! ## Design Principles
//!
//! This crate is **instrumented**: producers submit [`LogEvent`]s through a
//! cloneable [`ConsoleHandle`] from any thread, and the [`LayoutEngine`]
//! turns them into [`LayoutCommand`]s on the UI thread, one event per tick.
//! The engine never draws anything itself. A host applies the commands to a
//! flow layout of its own, or to the bundled [`ConsoleScene`].
//!
//! ## Action-Based Architecture
//!
//! The view uses a tagged action pattern. Instead of handling key events
//! directly, the orchestrating application maps key events to
//! [`ConsoleAction`] variants and dispatches them to the view state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use visual_console_layout::{console, CellMeasurer, ConsoleAction, ConsoleView, ConsoleViewState};
//!
//! let (handle, engine) = console(palette);
//! let mut state = ConsoleViewState::new(engine, Duration::from_millis(200));
//!
//! // Any thread
//! handle.open_group_default("load", "Loading level");
//! handle.log("spawned player", &LogStyleSpec::default());
//! handle.close_group("load");
//!
//! // Every frame
//! state.tick(&CellMeasurer);
//! ConsoleView::new(&theme).render_with_state(area, buf, &mut state);
//!
//! // Handle actions (mapped from key events by the orchestrator)
//! let events = state.handle_action(ConsoleAction::Activate, Instant::now());
//! ```
//!
//! [`LogEvent`]: visual_console_model::LogEvent

pub mod action;
pub mod event;
pub mod handle;
pub mod model;
pub mod state;
pub mod traits;
pub mod warning;
pub mod widget;

// Re-export commonly used types
pub use action::ConsoleAction;
pub use event::{ConsoleEvent, LayoutCommand};
pub use handle::{console, console_with_sink, ConsoleHandle};
pub use model::{ConsoleScene, ElementId, GroupIndex};
pub use state::{ActivationTracker, ConsoleViewState, EntryDetail, LayoutEngine};
pub use traits::{
    DefaultTheme, LogFacadeSink, Measurer, NativeSink, NoOpSink, ThemeProvider, EMIT_TARGET,
};
pub use warning::ConsoleWarning;
pub use widget::{CellMeasurer, ConsoleView, DetailPane, FooterHint};
