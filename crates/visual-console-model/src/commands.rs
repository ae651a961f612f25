//! Console command parsing
//!
//! Producers that cannot call the logging API directly (a tailed file, a
//! child process) write one command per line:
//!
//! ```text
//! ::group id=load,preset=c::Loading level
//! ::log preset=a::Spawned 12 enemies
//! ::warning::Texture missing
//! ::endgroup id=load::
//! ```
//!
//! Any line that is not a command is a plain info entry.

use crate::palette::Palette;
use crate::types::{LogEvent, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `::log [preset=p]::message`
    Log {
        message: String,
        params: CommandParams,
    },

    /// `::group id=g[,preset=p]::message`
    GroupStart {
        message: String,
        params: CommandParams,
    },

    /// `::endgroup id=g::`
    GroupEnd { id: String },

    /// `::warning::message`, `::error::message`, `::assert::message`
    Severity {
        severity: Severity,
        message: String,
        params: CommandParams,
    },
}

/// Optional parameters of a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandParams {
    /// Group id (id=)
    pub id: Option<String>,

    /// Preset name (preset=)
    pub preset: Option<String>,

    /// Context label (context=)
    pub context: Option<String>,
}

/// Parse a line for a console command
///
/// Returns `None` if the line is not a recognised command.
pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = COMMAND_REGEX.get_or_init(|| {
        // Match ::command params::message or ::command::message
        Regex::new(r"^::([a-zA-Z-]+)(?:\s+([^:]+?))?::(.*)$").unwrap()
    });

    let captures = re.captures(line.trim())?;
    let command_name = captures.get(1)?.as_str();
    let params = parse_params(captures.get(2).map(|m| m.as_str()).unwrap_or(""));
    let message = captures.get(3)?.as_str().to_string();

    let command = match command_name.to_lowercase().as_str() {
        "log" => ConsoleCommand::Log { message, params },
        "group" => ConsoleCommand::GroupStart { message, params },
        "endgroup" => {
            // The id may be given as a parameter or as the message
            let id = params.id.unwrap_or(message);
            ConsoleCommand::GroupEnd { id }
        }
        "warning" => ConsoleCommand::Severity {
            severity: Severity::Warning,
            message,
            params,
        },
        "error" => ConsoleCommand::Severity {
            severity: Severity::Error,
            message,
            params,
        },
        "assert" => ConsoleCommand::Severity {
            severity: Severity::Assert,
            message,
            params,
        },
        _ => return None, // Unknown command
    };

    Some(command)
}

/// Parse command parameters like "id=load,preset=c"
fn parse_params(params_str: &str) -> CommandParams {
    let mut params = CommandParams::default();

    for param in params_str.split(',') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }

        if let Some((key, value)) = param.split_once('=') {
            let value = value.trim().to_string();
            match key.trim() {
                "id" => params.id = Some(value),
                "preset" => params.preset = Some(value),
                "context" => params.context = Some(value),
                _ => {} // Ignore unknown parameters
            }
        }
    }

    params
}

impl ConsoleCommand {
    /// Build the event this command stands for
    pub fn into_event(self, palette: &Palette) -> LogEvent {
        match self {
            ConsoleCommand::Log { message, params } => {
                let event = match params.preset.as_deref() {
                    Some(preset) => palette.log_with_preset(message, preset),
                    None => palette.plain(message, Severity::Info),
                };
                with_context(event, params.context)
            }
            ConsoleCommand::GroupStart { message, params } => {
                let id = params.id.clone().unwrap_or_else(|| message.clone());
                let event = match params.preset.as_deref() {
                    Some(preset) => palette.open_group_with_preset(id, message, preset),
                    None => palette.open_group_default(id, message),
                };
                with_context(event, params.context)
            }
            ConsoleCommand::GroupEnd { id } => palette.close_group(id),
            ConsoleCommand::Severity {
                severity,
                message,
                params,
            } => with_context(palette.plain(message, severity), params.context),
        }
    }
}

fn with_context(event: LogEvent, context: Option<String>) -> LogEvent {
    match context {
        Some(context) => event.with_context(context),
        None => event,
    }
}

/// Turn any line into an event: commands are interpreted, everything else is
/// a plain info entry.
pub fn parse_line(line: &str, palette: &Palette) -> LogEvent {
    match parse_command(line) {
        Some(command) => command.into_event(palette),
        None => palette.plain(line, Severity::Info),
    }
}
