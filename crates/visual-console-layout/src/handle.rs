//! The emitting side of the console.
//!
//! A [`ConsoleHandle`] is cheap to clone and can be moved to any thread. Every
//! call builds one complete [`LogEvent`], forwards its message to the
//! [`NativeSink`] and queues it for the [`LayoutEngine`] without ever
//! blocking on layout work.

use crate::state::LayoutEngine;
use crate::traits::{LogFacadeSink, NativeSink};
use crate::warning::ConsoleWarning;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use visual_console_model::{LogEvent, LogStyleSpec, Palette, Severity};

/// Most recent warnings kept in the record
const MAX_WARNINGS: usize = 256;

/// What travels from the handles to the engine
#[derive(Debug)]
pub(crate) enum Queued {
    Event(LogEvent),
    /// A fresh run starts here
    Reset,
}

/// State shared between all handles and the engine
#[derive(Debug, Default)]
pub(crate) struct SharedState {
    cancelled: AtomicBool,
    queued: AtomicUsize,
    warnings: Mutex<Vec<ConsoleWarning>>,
}

impl SharedState {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn set_cancelled(&self, cancelled: bool) {
        self.cancelled.store(cancelled, Ordering::Release);
    }

    pub(crate) fn queued(&self) -> usize {
        self.queued.load(Ordering::Acquire)
    }

    fn enqueued(&self) {
        self.queued.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn dequeued(&self, count: usize) {
        // Never wraps: the counter is raised before the send it accounts for
        let _ = self
            .queued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_sub(count))
            });
    }

    pub(crate) fn warn(&self, warning: ConsoleWarning) {
        if warning.is_quiet() {
            log::debug!("{}", warning);
        } else {
            log::warn!("{}", warning);
        }

        let Ok(mut warnings) = self.warnings.lock() else {
            return;
        };
        if warnings.len() >= MAX_WARNINGS {
            warnings.remove(0);
        }
        warnings.push(warning);
    }

    pub(crate) fn warnings(&self) -> Vec<ConsoleWarning> {
        self.warnings
            .lock()
            .map(|warnings| warnings.clone())
            .unwrap_or_default()
    }

    pub(crate) fn clear_warnings(&self) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.clear();
        }
    }
}

/// Create a console whose calls are also forwarded to the `log` facade.
pub fn console(palette: Palette) -> (ConsoleHandle, LayoutEngine) {
    console_with_sink(palette, Arc::new(LogFacadeSink))
}

/// Create a console with a custom native sink.
pub fn console_with_sink(
    palette: Palette,
    sink: Arc<dyn NativeSink>,
) -> (ConsoleHandle, LayoutEngine) {
    let (sender, receiver) = mpsc::channel();
    let shared = Arc::new(SharedState::default());

    let handle = ConsoleHandle {
        sender,
        shared: Arc::clone(&shared),
        palette: Arc::new(palette),
        sink,
    };

    (handle, LayoutEngine::new(receiver, shared))
}

/// Thread-safe logging API of the console.
#[derive(Clone)]
pub struct ConsoleHandle {
    sender: Sender<Queued>,
    shared: Arc<SharedState>,
    palette: Arc<Palette>,
    sink: Arc<dyn NativeSink>,
}

impl std::fmt::Debug for ConsoleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleHandle")
            .field("queued", &self.shared.queued())
            .field("cancelled", &self.shared.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl ConsoleHandle {
    /// Colour and preset tables used to resolve styles
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A styled entry on the current row
    pub fn log(&self, message: impl Into<String>, style: &LogStyleSpec) {
        self.check_style(style);
        let event = self.palette.log(message, style);
        self.emit(event);
    }

    /// A styled entry that refers to some object of the application
    pub fn log_with_context(
        &self,
        message: impl Into<String>,
        style: &LogStyleSpec,
        context: impl Into<String>,
    ) {
        self.check_style(style);
        let event = self.palette.log(message, style).with_context(context);
        self.emit(event);
    }

    /// An entry styled by a named preset
    pub fn log_with_preset(&self, message: impl Into<String>, preset: &str) {
        self.check_preset(preset);
        let event = self.palette.log_with_preset(message, preset);
        self.emit(event);
    }

    /// Open group `id`. Everything logged until the matching
    /// [`close_group`](Self::close_group) goes on the row beneath it.
    pub fn open_group(&self, id: impl Into<String>, message: impl Into<String>, style: &LogStyleSpec) {
        self.check_style(style);
        let event = self.palette.open_group(id, message, style);
        self.emit(event);
    }

    /// Open group `id` with the default group style
    pub fn open_group_default(&self, id: impl Into<String>, message: impl Into<String>) {
        let event = self.palette.open_group_default(id, message);
        self.emit(event);
    }

    /// Open group `id` styled by a named preset
    pub fn open_group_with_preset(
        &self,
        id: impl Into<String>,
        message: impl Into<String>,
        preset: &str,
    ) {
        self.check_preset(preset);
        let event = self.palette.open_group_with_preset(id, message, preset);
        self.emit(event);
    }

    /// Close group `id`. Closing a group that is not open does nothing.
    pub fn close_group(&self, id: impl Into<String>) {
        let event = self.palette.close_group(id);
        self.emit(event);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(self.palette.plain(message, Severity::Warning));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(self.palette.plain(message, Severity::Error));
    }

    pub fn assert_log(&self, message: impl Into<String>) {
        self.emit(self.palette.plain(message, Severity::Assert));
    }

    /// Queue a pre-built event.
    ///
    /// Unlike the other calls this does not forward to the native sink; use
    /// it for events that already came from the native logging.
    pub fn submit(&self, event: LogEvent) {
        self.send(Queued::Event(event));
    }

    /// Start a fresh run.
    ///
    /// When the engine reaches this point of the queue it wipes the grid and
    /// the open groups, so ids left open by the previous run can be opened
    /// again. Unlike [`LayoutEngine::clear`] the events queued afterwards are
    /// kept.
    pub fn reset(&self) {
        self.send(Queued::Reset);
    }

    fn send(&self, item: Queued) {
        self.shared.enqueued();
        if self.sender.send(item).is_err() {
            // Engine is gone, nothing will ever drain this
            self.shared.dequeued(1);
        }
    }

    /// Drop every event drained from now on (closers still apply)
    pub fn set_cancelled(&self, cancelled: bool) {
        self.shared.set_cancelled(cancelled);
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }

    /// Number of queued events not yet drained
    pub fn pending(&self) -> usize {
        self.shared.queued()
    }

    fn emit(&self, event: LogEvent) {
        let event = match capture_stack_trace() {
            Some(trace) => event.with_stack_trace(trace),
            None => event,
        };
        self.sink.emit(&event.text, &event.stack_trace, event.severity);
        self.submit(event);
    }

    fn check_style(&self, style: &LogStyleSpec) {
        for name in [&style.text_color, &style.background_color] {
            if self.palette.colors.get(name).is_none() {
                self.shared
                    .warn(ConsoleWarning::UnknownColorName(name.to_string()));
            }
        }
    }

    fn check_preset(&self, preset: &str) {
        if self.palette.presets.get(preset).is_none() {
            self.shared
                .warn(ConsoleWarning::UnknownPresetName(preset.to_string()));
        }
    }
}

/// The caller's stack, when backtraces are enabled (`RUST_BACKTRACE`)
fn capture_stack_trace() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoOpSink;
    use std::thread;

    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<(String, Severity)>>,
    }

    impl NativeSink for RecordingSink {
        fn emit(&self, text: &str, _stack_trace: &str, severity: Severity) {
            if let Ok(mut messages) = self.messages.lock() {
                messages.push((text.to_string(), severity));
            }
        }
    }

    #[test]
    fn test_calls_are_forwarded_to_sink() {
        let sink = Arc::new(RecordingSink::default());
        let (handle, _engine) = console_with_sink(Palette::default(), sink.clone());

        handle.log("hello", &LogStyleSpec::default());
        handle.warn("careful");
        handle.submit(Palette::default().plain("not forwarded", Severity::Info));

        let messages = sink.messages.lock().unwrap();
        assert_eq!(
            *messages,
            vec![
                ("hello".to_string(), Severity::Info),
                ("careful".to_string(), Severity::Warning),
            ]
        );
        assert_eq!(handle.pending(), 3);
    }

    #[test]
    fn test_submit_from_many_threads() {
        let (handle, _engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));

        let producers: Vec<_> = (0..4)
            .map(|t| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        handle.log(format!("{}-{}", t, i), &LogStyleSpec::default());
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        assert_eq!(handle.pending(), 100);
    }

    #[test]
    fn test_unknown_names_are_recorded() {
        let (handle, engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));

        handle.log("x", &LogStyleSpec::default().text_color("not-a-colour"));
        handle.log_with_preset("y", "zzz");
        handle.log_with_preset("z", "a");

        assert_eq!(
            engine.warnings(),
            vec![
                ConsoleWarning::UnknownColorName("not-a-colour".to_string()),
                ConsoleWarning::UnknownPresetName("zzz".to_string()),
            ]
        );
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let (handle, engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        let other = handle.clone();

        other.set_cancelled(true);
        assert!(handle.is_cancelled());
        assert!(engine.is_cancelled());
    }

    #[test]
    fn test_submit_after_engine_dropped() {
        let (handle, engine) = console_with_sink(Palette::default(), Arc::new(NoOpSink));
        drop(engine);

        handle.log("lost", &LogStyleSpec::default());
        assert_eq!(handle.pending(), 0);
    }
}
