//! Report event type

use std::fmt;

/// Severity of a report event.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// Progress and findings that need no action.
    Info,

    /// Something that works today but is likely to break a client later.
    Warn,

    /// Something that stops a client from working.
    Error,
}

impl Level {
    /// Fixed-width tag used when printing the event.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERRO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single report line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    /// Severity
    pub level: Level,

    /// Human-readable message
    pub message: String,
}

impl Event {
    /// Create a new event
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
