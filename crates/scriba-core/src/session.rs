//! The seam between the registry and whatever text-editing widget backs a
//! page. The registry owns sessions exclusively and only ever talks to them
//! through this trait; the TUI supplies a widget-backed implementation.

/// One open editing session. Created by the registry's session factory when a
/// page is added and dropped when the page is removed.
pub trait EditorSession {
    /// Full buffer contents.
    fn text(&self) -> String;

    /// Buffer contents as lines, without trailing newlines.
    fn lines(&self) -> Vec<String>;

    /// Zero-based (row, column) cursor position.
    fn cursor(&self) -> (usize, usize);

    fn set_cursor(&mut self, row: usize, col: usize);

    /// Syntax mode tag, e.g. `"xml"`.
    fn mode(&self) -> &str;

    fn set_mode(&mut self, mode: &str);

    /// True when the buffer is a single empty line, the state of a freshly
    /// created untitled page.
    fn is_empty(&self) -> bool {
        let lines = self.lines();
        lines.is_empty() || (lines.len() == 1 && lines[0].is_empty())
    }
}

/// Creates the session for a newly added page from its initial content.
pub type SessionFactory<S> = Box<dyn Fn(&str) -> S>;

/// Plain in-memory session with no widget behind it. Used in headless
/// contexts and tests.
pub struct BufferSession {
    lines: Vec<String>,
    cursor: (usize, usize),
    mode: String,
}

impl BufferSession {
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
            cursor: (0, 0),
            mode: "text".to_string(),
        }
    }
}

impl EditorSession for BufferSession {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.lines.len().saturating_sub(1));
        let col = col.min(self.lines.get(row).map(String::len).unwrap_or(0));
        self.cursor = (row, col);
    }

    fn mode(&self) -> &str {
        &self.mode
    }

    fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_session_splits_lines() {
        let session = BufferSession::new("one\ntwo\nthree");
        assert_eq!(session.lines(), vec!["one", "two", "three"]);
        assert_eq!(session.text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_buffer_session_empty_content_is_empty() {
        let session = BufferSession::new("");
        assert!(session.is_empty());

        let session = BufferSession::new("x");
        assert!(!session.is_empty());
    }

    #[test]
    fn test_buffer_session_cursor_clamps() {
        let mut session = BufferSession::new("short\nlonger line");
        session.set_cursor(5, 100);
        assert_eq!(session.cursor(), (1, 11));
    }
}
