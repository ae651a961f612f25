//! Stack trace line parsing for the detail pane

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Source location referenced by a trace line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
}

/// One line of a stack trace, split around its source link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLine {
    /// Text before the link (or the whole line when there is none)
    pub before: String,

    /// The link text itself, e.g. `(at src/main.rs:42)` or `at ./src/main.rs:42:7`
    pub link: Option<String>,

    /// Text after the link
    pub after: String,

    /// Parsed location of the link
    pub location: Option<SourceLocation>,
}

impl TraceLine {
    fn plain(line: &str) -> Self {
        Self {
            before: line.to_string(),
            link: None,
            after: String::new(),
            location: None,
        }
    }

    fn linked(line: &str, whole: regex::Match, location: SourceLocation) -> Self {
        Self {
            before: line[..whole.start()].to_string(),
            link: Some(whole.as_str().to_string()),
            after: line[whole.end()..].to_string(),
            location: Some(location),
        }
    }
}

/// Parse one line, trying the `(at file:line)` form first and then the
/// `at file:line:column` lines of a Rust backtrace.
fn parse_trace_line(line: &str) -> TraceLine {
    static BRACKETED_REGEX: OnceLock<Regex> = OnceLock::new();
    static BACKTRACE_REGEX: OnceLock<Regex> = OnceLock::new();

    let bracketed = BRACKETED_REGEX.get_or_init(|| {
        // Match "(at path/to/file.rs:42)"
        Regex::new(r"\(at (.+):(\d+)\)").unwrap()
    });
    let backtrace = BACKTRACE_REGEX.get_or_init(|| {
        // Match "      at ./src/main.rs:42:7" (column optional)
        Regex::new(r"^\s*(at (.+?):(\d+)(?::(\d+))?)\s*$").unwrap()
    });

    if let Some(captures) = bracketed.captures(line) {
        if let (Some(whole), Some(file), Some(number)) =
            (captures.get(0), captures.get(1), captures.get(2))
        {
            if let Ok(number) = number.as_str().parse() {
                let location = SourceLocation {
                    file: file.as_str().to_string(),
                    line: number,
                    column: None,
                };
                return TraceLine::linked(line, whole, location);
            }
        }
    }

    if let Some(captures) = backtrace.captures(line) {
        if let (Some(whole), Some(file), Some(number)) =
            (captures.get(1), captures.get(2), captures.get(3))
        {
            if let Ok(number) = number.as_str().parse() {
                let location = SourceLocation {
                    file: file.as_str().to_string(),
                    line: number,
                    column: captures.get(4).and_then(|c| c.as_str().parse().ok()),
                };
                return TraceLine::linked(line, whole, location);
            }
        }
    }

    TraceLine::plain(line)
}

/// Split a stack trace into lines and pick out their source locations.
///
/// Trailing empty lines are dropped.
pub fn parse_stack_trace(trace: &str) -> Vec<TraceLine> {
    let mut lines: Vec<TraceLine> = trace.lines().map(parse_trace_line).collect();

    while lines
        .last()
        .is_some_and(|l| l.link.is_none() && l.before.trim().is_empty())
    {
        lines.pop();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_with_location() {
        let lines = parse_stack_trace("app::run() (at src/app.rs:42) [inlined]");
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.before, "app::run() ");
        assert_eq!(line.link.as_deref(), Some("(at src/app.rs:42)"));
        assert_eq!(line.after, " [inlined]");
        assert_eq!(
            line.location,
            Some(SourceLocation {
                file: "src/app.rs".to_string(),
                line: 42,
                column: None,
            })
        );
    }

    #[test]
    fn test_lines_without_location() {
        let lines = parse_stack_trace("first\nsecond\n\n");
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.location.is_none()));
        assert_eq!(lines[1].before, "second");
    }

    #[test]
    fn test_rust_backtrace_line() {
        let lines = parse_stack_trace(
            "   3: visual_console::app::App::tick\n             at ./src/app.rs:129:18\n",
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].location, None);
        assert_eq!(lines[1].link.as_deref(), Some("at ./src/app.rs:129:18"));
        assert_eq!(lines[1].before, "             ");
        assert_eq!(
            lines[1].location,
            Some(SourceLocation {
                file: "./src/app.rs".to_string(),
                line: 129,
                column: Some(18),
            })
        );
    }

    #[test]
    fn test_captured_backtrace_has_links() {
        let trace = std::backtrace::Backtrace::force_capture().to_string();
        let lines = parse_stack_trace(&trace);
        assert!(lines.iter().any(|l| l.location.is_some()));
    }

    #[test]
    fn test_empty_trace() {
        assert!(parse_stack_trace("").is_empty());
    }
}
