//! Selection details and double-activation detection.

use super::LayoutEngine;
use crate::model::ElementId;
use std::time::{Duration, Instant};
use visual_console_model::{parse_stack_trace, Severity, TraceLine};

/// Everything the detail pane shows about the selected entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    pub text: String,
    pub severity: Severity,
    /// Parsed stack trace, empty when none was captured
    pub trace: Vec<TraceLine>,
    /// Label of the object the entry refers to
    pub context: Option<String>,
    /// Id of the group this entry opens
    pub group_id: Option<String>,
}

impl LayoutEngine {
    /// Detail of a placed entry. Placeholders have none.
    pub fn detail(&self, element: ElementId) -> Option<EntryDetail> {
        let event = self.grid().element(element)?.event()?;

        Some(EntryDetail {
            text: event.text.clone(),
            severity: event.severity,
            trace: parse_stack_trace(&event.stack_trace),
            context: event.context.clone(),
            group_id: event
                .group_id()
                .filter(|_| event.is_group_opener())
                .map(str::to_string),
        })
    }
}

/// Turns single activations into double activations.
///
/// Two activations of the same element within the window count as one double
/// activation; a third starts over.
#[derive(Debug, Clone)]
pub struct ActivationTracker {
    window: Duration,
    last: Option<(ElementId, Instant)>,
}

impl ActivationTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Record an activation. Returns `true` if it completes a double
    /// activation.
    pub fn register(&mut self, element: ElementId, now: Instant) -> bool {
        match self.last {
            Some((last, at)) if last == element && now.duration_since(at) <= self.window => {
                self.last = None;
                true
            }
            _ => {
                self.last = Some((element, now));
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ActivationTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_activation_within_window() {
        let mut tracker = ActivationTracker::default();
        let start = Instant::now();

        assert!(!tracker.register(ElementId(1), start));
        assert!(tracker.register(ElementId(1), start + Duration::from_millis(150)));
        // The pair was consumed
        assert!(!tracker.register(ElementId(1), start + Duration::from_millis(180)));
    }

    #[test]
    fn test_slow_or_different_activations_are_single() {
        let mut tracker = ActivationTracker::new(Duration::from_millis(200));
        let start = Instant::now();

        assert!(!tracker.register(ElementId(1), start));
        assert!(!tracker.register(ElementId(1), start + Duration::from_millis(250)));
        assert!(!tracker.register(ElementId(2), start + Duration::from_millis(300)));
        tracker.reset();
        assert!(!tracker.register(ElementId(2), start + Duration::from_millis(310)));
    }
}
