//! Test support utilities
//!
//! Captures reported events in memory so tests can assert on them. Only
//! available with the `test-support` feature.

use std::sync::{Arc, Mutex};

use crate::{Event, Level, Reporter, Summary};

/// A reporter that captures all events in memory for testing
#[derive(Clone, Debug, Default)]
pub struct CaptureReporter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl CaptureReporter {
    /// Create a new capture reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Captured events of one level
    #[must_use]
    pub fn at_level(&self, level: Level) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .collect()
    }

    /// Number of captured events of one level
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.at_level(level).len()
    }

    /// Check if any event of the given level contains the text
    #[must_use]
    pub fn contains(&self, level: Level, text: &str) -> bool {
        self.at_level(level)
            .iter()
            .any(|event| event.message.contains(text))
    }

    /// Number of events of the given level containing the text
    #[must_use]
    pub fn count_containing(&self, level: Level, text: &str) -> usize {
        self.at_level(level)
            .iter()
            .filter(|event| event.message.contains(text))
            .count()
    }

    /// Clear captured events
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Reporter for CaptureReporter {
    fn report(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn summary(&self) -> Summary {
        Summary::from_events(&self.events())
    }
}
