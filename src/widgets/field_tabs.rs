use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::cron::CronKey;
use crate::ui::AppState;

pub fn draw_field_tabs(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let current_index = state.tab;

    let mut titles: Vec<Line> = Vec::new();
    for key in CronKey::ALL {
        let i = key.index();
        let is_selected = i == current_index;
        let hidden = state.config.generator_disabled.field_disabled(key);
        let fn_key = format!("F{}", i + 1);

        let mut text_style = if is_selected {
            Style::default()
                .fg(theme.cursor)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.hint)
        };
        if hidden {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }

        let key_style = if is_selected {
            Style::default()
                .fg(theme.value)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.hint)
        };

        // [F1] Second
        titles.push(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.frame)),
            Span::styled(fn_key, key_style),
            Span::styled("]", Style::default().fg(theme.frame)),
            Span::raw(" "),
            Span::styled(key.label(), text_style),
        ]));
    }

    let tabs = Tabs::new(titles)
        .select(current_index)
        .padding("", "")
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.cursor)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(theme.frame)));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.frame));

    f.render_widget(tabs.block(block), area);
}
