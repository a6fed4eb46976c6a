//! Core reporter trait

use crate::{Event, Level, Summary};

/// Sink for diagnostic events.
///
/// Stages only ever write to a reporter. Implementations decide whether to
/// print, store or drop what they receive.
pub trait Reporter: Send + Sync + 'static {
    /// Record an event
    fn report(&self, event: Event);

    /// Summary of everything reported so far
    fn summary(&self) -> Summary;
}

/// Extension trait for convenient reporting methods
pub trait ReporterExt: Reporter {
    /// Report progress or a finding that needs no action
    #[inline]
    fn info(&self, msg: impl Into<String>) {
        self.report(Event::new(Level::Info, msg));
    }

    /// Report a warning
    #[inline]
    fn warn(&self, msg: impl Into<String>) {
        self.report(Event::new(Level::Warn, msg));
    }

    /// Report an error
    #[inline]
    fn error(&self, msg: impl Into<String>) {
        self.report(Event::new(Level::Error, msg));
    }
}

// Implement for all reporters
impl<T: Reporter + ?Sized> ReporterExt for T {}
