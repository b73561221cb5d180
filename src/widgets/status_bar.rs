use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, Focus, ToastLevel};

pub fn draw_footer(f: &mut Frame, area: Rect, state: &AppState, help_text: &str) {
    let theme = &state.theme;
    let mut spans: Vec<Span> = Vec::new();
    if let Some(t) = &state.toast {
        let color = theme.toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
            ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", t.text),
            Style::default().fg(color),
        ));
    }
    if state.focus != Focus::Modes {
        let focus = match state.focus {
            Focus::Param(slot) => format!("param {}", slot + 1),
            Focus::Options => "values".to_string(),
            Focus::Input => "input".to_string(),
            Focus::Modes => String::new(),
        };
        spans.push(Span::styled(
            format!("editing: {focus}  |  "),
            Style::default().fg(theme.title),
        ));
    }
    spans.push(Span::styled(help_text.to_string(), theme.hint_style()));
    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}
