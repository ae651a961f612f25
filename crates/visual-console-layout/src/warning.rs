//! Non-fatal conditions recorded by the console.

use thiserror::Error;

/// Everything that can go wrong while logging to the console.
///
/// None of these ever reach the emitting caller; they are logged and kept in
/// the console's warning record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleWarning {
    #[error("group '{0}' is already open, ignoring the second open")]
    DuplicateGroupId(String),

    #[error("no open group with id '{0}' to close")]
    UnknownGroupClose(String),

    #[error("unknown colour name '{0}', using the fallback colour")]
    UnknownColorName(String),

    #[error("unknown preset '{0}', using the default preset")]
    UnknownPresetName(String),
}

impl ConsoleWarning {
    /// Closing an unknown group is routine for best-effort producers and is
    /// not worth a warning in the log file
    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::UnknownGroupClose(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            ConsoleWarning::DuplicateGroupId("g1".to_string()).to_string(),
            "group 'g1' is already open, ignoring the second open"
        );
        assert!(ConsoleWarning::UnknownGroupClose("x".to_string()).is_quiet());
        assert!(!ConsoleWarning::UnknownPresetName("x".to_string()).is_quiet());
    }
}
