//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/visual-console/ on Linux)
//!
//! Besides the file, records at info level and above are mirrored into the
//! console once a handle is attached, so the app's own logging shows up as
//! entries too.

use anyhow::{Context, Result};
use log::{LevelFilter, Metadata, Record};
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::sync::OnceLock;
use visual_console_layout::{ConsoleHandle, EMIT_TARGET};
use visual_console_model::Severity;

/// Handle the bridge submits into, set once the console exists
static CONSOLE: OnceLock<ConsoleHandle> = OnceLock::new();

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let filename = visual_console_config::log_file_name(&timestamp);

    if cfg!(debug_assertions) {
        // Debug build: log in current directory for convenience
        PathBuf::from(filename)
    } else {
        // Release build: log in cache directory
        visual_console_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Map a level name (RUST_LOG or config) to a filter
pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize file-based logging plus the console bridge
///
/// `RUST_LOG` wins over the configured level. Returns the path to the log
/// file.
pub fn init(configured_level: &str) -> Result<PathBuf> {
    let log_file = log_file_path();

    let level = std::env::var("RUST_LOG")
        .map(|v| parse_level(&v))
        .unwrap_or_else(|_| parse_level(configured_level));

    // Configure simplelog with timestamps
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    CombinedLogger::init(vec![
        WriteLogger::new(level, config, file),
        Box::new(ConsoleBridge::new(LevelFilter::Info)),
    ])
    .context("Failed to initialize logger")?;

    Ok(log_file)
}

/// Start mirroring log records into the console
pub fn attach(handle: ConsoleHandle) {
    if CONSOLE.set(handle).is_err() {
        log::warn!("Console already attached to the logger");
    }
}

/// Mirrors log records into the console as plain entries
struct ConsoleBridge {
    level: LevelFilter,
}

impl ConsoleBridge {
    fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

/// Whether a record belongs in the console. Records the console itself
/// emitted would show up twice.
fn should_mirror(metadata: &Metadata, level: LevelFilter) -> bool {
    metadata.level() <= level && metadata.target() != EMIT_TARGET
}

impl log::Log for ConsoleBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        should_mirror(metadata, self.level)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(handle) = CONSOLE.get() else {
            return;
        };

        let event = handle
            .palette()
            .plain(record.args().to_string(), Severity::from(record.level()))
            .with_context(record.target());
        handle.submit(event);
    }

    fn flush(&self) {}
}

impl SharedLogger for ConsoleBridge {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn log::Log> {
        Box::new(*self)
    }
}
