//! `tui-textarea`-backed editor sessions. The registry only sees the
//! [`EditorSession`] trait; the TUI reaches through to the widget to feed it
//! input and render it.

use ratatui::style::{Modifier, Style};
use scriba_core::config::EditorSettings;
use scriba_core::EditorSession;
use tui_textarea::{CursorMove, Input, TextArea};

pub struct TextAreaSession {
    textarea: TextArea<'static>,
    mode: String,
}

impl TextAreaSession {
    pub fn new(content: &str, settings: &EditorSettings) -> Self {
        let mut textarea = TextArea::from(content.split('\n').map(str::to_string));
        textarea.set_tab_length(settings.tab_width);
        if settings.show_line_numbers {
            textarea.set_line_number_style(Style::default().add_modifier(Modifier::DIM));
        }
        textarea.set_cursor_line_style(Style::default());
        Self {
            textarea,
            mode: settings.mode.clone(),
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    /// Feed a key or mouse event into the widget. Returns whether the buffer
    /// was modified.
    pub fn input(&mut self, input: impl Into<Input>) -> bool {
        self.textarea.input(input)
    }
}

impl EditorSession for TextAreaSession {
    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn lines(&self) -> Vec<String> {
        self.textarea.lines().to_vec()
    }

    fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    fn set_cursor(&mut self, row: usize, col: usize) {
        self.textarea
            .move_cursor(CursorMove::Jump(row as u16, col as u16));
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

    fn settings() -> EditorSettings {
        scriba_core::Settings::default().editor
    }

    #[test]
    fn test_session_round_trips_content() {
        let session = TextAreaSession::new("<score>\n</score>", &settings());
        assert_eq!(session.lines(), vec!["<score>", "</score>"]);
        assert_eq!(session.text(), "<score>\n</score>");
    }

    #[test]
    fn test_empty_session_is_empty() {
        let session = TextAreaSession::new("", &settings());
        assert!(session.is_empty());
    }

    #[test]
    fn test_cursor_jump() {
        let mut session = TextAreaSession::new("a\nbb\nccc", &settings());
        session.set_cursor(2, 1);
        assert_eq!(session.cursor(), (2, 1));
    }
}
