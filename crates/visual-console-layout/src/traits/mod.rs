//! Extension traits for plugging the console into a host.

mod measurer;
mod native_sink;
mod theme_provider;

pub use measurer::Measurer;
pub use native_sink::{LogFacadeSink, NativeSink, NoOpSink, EMIT_TARGET};
pub use theme_provider::{DefaultTheme, ThemeProvider};
