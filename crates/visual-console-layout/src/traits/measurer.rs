//! Trait for measuring entry widths after the host's layout pass.

use visual_console_model::LogEvent;

/// Measures the natural width of an entry button, in cells.
///
/// The engine places entries unmeasured and asks the measurer for their real
/// width one frame later, in [`crate::LayoutEngine::finalize_widths`].
///
/// Closures work too:
///
/// ```
/// use visual_console_layout::Measurer;
/// use visual_console_model::LogEvent;
///
/// let fixed = |_: &LogEvent| 10u32;
/// fn takes(_: &impl Measurer) {}
/// takes(&fixed);
/// ```
pub trait Measurer {
    fn measure(&self, event: &LogEvent) -> u32;
}

impl<F> Measurer for F
where
    F: Fn(&LogEvent) -> u32,
{
    fn measure(&self, event: &LogEvent) -> u32 {
        self(event)
    }
}
