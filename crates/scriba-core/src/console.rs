//! Append-only editor console: timestamped, severity-tagged entries plus the
//! border-flash state the UI renders when a message lands.

use std::time::{Duration, Instant};

use chrono::Local;

/// How long a severity flash stays on the console border.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(600);

/// Entries shorter than this are dropped; external validators emit stray
/// one-character lines that are never worth showing.
const MIN_ENTRY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Log,
    Warn,
    Error,
    Neutral,
}

#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    /// Local wall-clock time the entry was posted, `HH:MM:SS`.
    pub timestamp: String,
    pub severity: Severity,
    pub text: String,
}

/// An in-flight border flash. At most one exists at a time; a flash already
/// running suppresses new ones until it expires.
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub severity: Severity,
    started: Instant,
}

#[derive(Default)]
pub struct Console {
    entries: Vec<ConsoleEntry>,
    highlight: Option<Highlight>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, text: impl Into<String>) {
        self.post(text.into(), Severity::Log);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.post(text.into(), Severity::Warn);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.post(text.into(), Severity::Error);
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.post(text.into(), Severity::Neutral);
    }

    /// The previous four are wrappers for this.
    fn post(&mut self, text: String, severity: Severity) {
        if text.len() < MIN_ENTRY_LEN {
            return;
        }

        self.entries.push(ConsoleEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            severity,
            text,
        });

        if self.highlight.is_none() {
            self.highlight = Some(Highlight {
                severity,
                started: Instant::now(),
            });
        }
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Expire the flash once its duration has passed. Called once per UI
    /// frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(h) = self.highlight {
            if now.duration_since(h.started) >= HIGHLIGHT_DURATION {
                self.highlight = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_appends_tagged_entry() {
        let mut console = Console::new();
        console.error("something broke");

        assert_eq!(console.len(), 1);
        let entry = &console.entries()[0];
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.text, "something broke");
        // HH:MM:SS, zero-padded
        assert_eq!(entry.timestamp.len(), 8);
        assert_eq!(entry.timestamp.as_bytes()[2], b':');
        assert_eq!(entry.timestamp.as_bytes()[5], b':');
    }

    #[test]
    fn test_short_entries_are_discarded() {
        let mut console = Console::new();
        console.log("");
        console.log("x");
        console.log("ok");

        assert_eq!(console.len(), 1);
        assert_eq!(console.entries()[0].text, "ok");
    }

    #[test]
    fn test_highlight_single_in_flight() {
        let mut console = Console::new();
        console.error("first message");
        console.log("second message");

        // The error flash is still running, so the log does not replace it.
        let h = console.highlight().expect("flash in flight");
        assert_eq!(h.severity, Severity::Error);
    }

    #[test]
    fn test_highlight_expires_on_tick() {
        let mut console = Console::new();
        console.warn("watch out");
        assert!(console.highlight().is_some());

        console.tick_at(Instant::now() + HIGHLIGHT_DURATION);
        assert!(console.highlight().is_none());

        // A new message may flash again after expiry.
        console.log("next message");
        assert!(console.highlight().is_some());
    }
}
