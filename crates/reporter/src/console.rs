//! Reporter that prints to stdout as events arrive

use std::sync::Mutex;

use console::{Style, Term};

use crate::{Event, Level, Reporter, Summary};

/// Prints each event as it is reported and keeps it for the summary.
#[derive(Debug)]
pub struct ConsoleReporter {
    events: Mutex<Vec<Event>>,
    term: Term,
}

impl ConsoleReporter {
    /// Create a reporter writing to stdout
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            term: Term::stdout(),
        }
    }

    /// Print a blank line
    pub fn new_line(&self) {
        let _ = self.term.write_line("");
    }

    /// Print the end-of-run summary
    pub fn print_summary(&self) {
        let _ = self.term.write_line(&self.summary().render(styled_tag));
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: Event) {
        let _ = self
            .term
            .write_line(&format!("{} {}", styled_tag(event.level), event.message));

        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn summary(&self) -> Summary {
        self.events
            .lock()
            .map(|events| Summary::from_events(&events))
            .unwrap_or_default()
    }
}

fn styled_tag(level: Level) -> String {
    let style = match level {
        Level::Info => Style::new().green(),
        Level::Warn => Style::new().yellow().bold(),
        Level::Error => Style::new().red().bold(),
    };

    style.apply_to(format!("[{level}]")).to_string()
}
