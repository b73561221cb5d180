use crate::theme::Theme;
use crossterm::event::KeyCode;
use ratatui::crossterm::event as rt_event;
use ratatui::prelude::*;
use tui_textarea::{CursorMove, TextArea};

/// What a key did to the free-text expression line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Editing,
    Commit(String),
    Cancel,
}

/// Single-line expression input. Typing only changes the local text; the
/// value leaves the widget on Enter.
#[derive(Clone)]
pub struct ExpressionInput {
    ta: TextArea<'static>,
    placeholder: String,
}

impl Default for ExpressionInput {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ExpressionInput {
    pub fn new(placeholder: Option<&str>) -> Self {
        let mut input = Self {
            ta: TextArea::default(),
            placeholder: placeholder.unwrap_or("cron expression").to_string(),
        };
        input.set_text("");
        input
    }

    pub fn set_text(&mut self, text: &str) {
        let mut ta = TextArea::new(vec![text.to_string()]);
        ta.set_placeholder_text(self.placeholder.clone());
        ta.set_cursor_line_style(Style::default());
        ta.move_cursor(CursorMove::End);
        self.ta = ta;
    }

    pub fn text(&self) -> String {
        self.ta.lines().join(" ")
    }

    pub fn on_key(&mut self, key: KeyCode) -> InputOutcome {
        let code = match key {
            KeyCode::Enter => return InputOutcome::Commit(self.text()),
            KeyCode::Esc => return InputOutcome::Cancel,
            KeyCode::Char(c) => rt_event::KeyCode::Char(c),
            KeyCode::Backspace => rt_event::KeyCode::Backspace,
            KeyCode::Delete => rt_event::KeyCode::Delete,
            KeyCode::Left => rt_event::KeyCode::Left,
            KeyCode::Right => rt_event::KeyCode::Right,
            KeyCode::Home => rt_event::KeyCode::Home,
            KeyCode::End => rt_event::KeyCode::End,
            _ => return InputOutcome::Editing,
        };
        let _ = self.ta.input(rt_event::KeyEvent::new(
            code,
            rt_event::KeyModifiers::NONE,
        ));
        InputOutcome::Editing
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let title = if focused {
            "Expression (Enter apply, Esc cancel)"
        } else {
            "Expression"
        };
        self.ta
            .set_block(crate::widgets::chrome::panel_block(title, focused, theme));
        let cursor = if focused {
            theme.cursor_style()
        } else {
            Style::default()
        };
        self.ta.set_cursor_style(cursor);
        f.render_widget(&self.ta, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &mut ExpressionInput, s: &str) {
        for c in s.chars() {
            assert_eq!(input.on_key(KeyCode::Char(c)), InputOutcome::Editing);
        }
    }

    #[test]
    fn typing_edits_locally_until_enter() {
        let mut input = ExpressionInput::new(None);
        input.set_text("0 0 12 * * ");
        typed(&mut input, "?");
        assert_eq!(input.text(), "0 0 12 * * ?");
        assert_eq!(
            input.on_key(KeyCode::Enter),
            InputOutcome::Commit("0 0 12 * * ?".into())
        );
    }

    #[test]
    fn backspace_and_escape() {
        let mut input = ExpressionInput::default();
        input.set_text("* * * * * ?x");
        input.on_key(KeyCode::Backspace);
        assert_eq!(input.text(), "* * * * * ?");
        assert_eq!(input.on_key(KeyCode::Esc), InputOutcome::Cancel);
    }
}
