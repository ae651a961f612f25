//! Trait for forwarding every console call to the platform's own logging.

use visual_console_model::Severity;

/// Log target used by [`LogFacadeSink`].
///
/// Loggers that feed records back into the console must skip this target.
pub const EMIT_TARGET: &str = "visual_console";

/// Receives the plain message of every console call.
///
/// The visual console augments the platform's default logging; it does not
/// replace it.
pub trait NativeSink: Send + Sync {
    fn emit(&self, text: &str, stack_trace: &str, severity: Severity);
}

/// Forwards to the `log` facade under [`EMIT_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacadeSink;

impl NativeSink for LogFacadeSink {
    fn emit(&self, text: &str, stack_trace: &str, severity: Severity) {
        let level = log::Level::from(severity);
        if stack_trace.is_empty() {
            log::log!(target: EMIT_TARGET, level, "{}", text);
        } else {
            log::log!(target: EMIT_TARGET, level, "{}\n{}", text, stack_trace);
        }
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl NativeSink for NoOpSink {
    fn emit(&self, _text: &str, _stack_trace: &str, _severity: Severity) {}
}
