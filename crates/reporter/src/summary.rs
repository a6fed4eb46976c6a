//! End-of-run summary

use std::fmt;

use crate::{Event, Level};

/// Counts by kind plus the messages that need attention.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Number of info events
    pub infos: usize,

    /// Warning messages, in report order
    pub warnings: Vec<String>,

    /// Error messages, in report order
    pub errors: Vec<String>,
}

impl Summary {
    /// Build a summary from a list of events
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let mut summary = Self::default();

        for event in events {
            match event.level {
                Level::Info => summary.infos += 1,
                Level::Warn => summary.warnings.push(event.message.clone()),
                Level::Error => summary.errors.push(event.message.clone()),
            }
        }

        summary
    }

    /// Number of events of the given level
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        match level {
            Level::Info => self.infos,
            Level::Warn => self.warnings.len(),
            Level::Error => self.errors.len(),
        }
    }

    /// True when nothing needs the operator's attention
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

impl Summary {
    /// Render the summary, labelling each listed message with `tag`.
    #[must_use]
    pub fn render<F>(&self, tag: F) -> String
    where
        F: Fn(Level) -> String,
    {
        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_with(&mut text, tag);
        text
    }

    fn write_with<W, F>(&self, out: &mut W, tag: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(Level) -> String,
    {
        writeln!(out, "Summary:")?;

        for message in &self.warnings {
            writeln!(out, "{} {message}", tag(Level::Warn))?;
        }
        for message in &self.errors {
            writeln!(out, "{} {message}", tag(Level::Error))?;
        }

        if self.is_clean() {
            write!(out, "Found no issues")
        } else {
            write!(
                out,
                "Found {} warning(s) and {} error(s), see listing above",
                self.warnings.len(),
                self.errors.len()
            )
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |level| format!("[{level}]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_level() {
        let events = vec![
            Event::new(Level::Info, "parsing"),
            Event::new(Level::Warn, "single host"),
            Event::new(Level::Info, "done"),
            Event::new(Level::Error, "unreachable"),
        ];

        let summary = Summary::from_events(&events);

        assert_eq!(summary.count(Level::Info), 2);
        assert_eq!(summary.warnings, vec!["single host".to_string()]);
        assert_eq!(summary.errors, vec!["unreachable".to_string()]);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_display_lists_issues() {
        let summary = Summary::from_events(&[
            Event::new(Level::Warn, "w1"),
            Event::new(Level::Error, "e1"),
        ]);

        let text = summary.to_string();
        assert!(text.contains("[WARN] w1"));
        assert!(text.contains("[ERRO] e1"));
        assert!(text.contains("1 warning(s) and 1 error(s)"));
    }

    #[test]
    fn test_clean_summary() {
        let summary = Summary::from_events(&[Event::new(Level::Info, "ok")]);
        assert!(summary.is_clean());
        assert!(summary.to_string().ends_with("Found no issues"));
    }

    #[test]
    fn test_render_uses_given_tags() {
        let summary = Summary::from_events(&[
            Event::new(Level::Warn, "w1"),
            Event::new(Level::Error, "e1"),
        ]);

        let text = summary.render(|level| format!("<{level}>"));

        assert_eq!(
            text,
            "Summary:\n<WARN> w1\n<ERRO> e1\nFound 1 warning(s) and 1 error(s), see listing above"
        );
        assert_eq!(summary.render(|level| format!("[{level}]")), summary.to_string());
    }
}
