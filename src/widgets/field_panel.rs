use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{current_key, OPTION_COLUMNS};
use crate::cron::codec::{self, FieldMode, Params};
use crate::cron::{weekday_label, CronKey, ScalarDomain};
use crate::theme::Theme;
use crate::ui::{AppState, Focus};
use crate::widgets::chrome::panel_block;

/// Rows of the List grid kept on screen.
const GRID_ROWS: usize = 4;

struct SlotView<'a> {
    key: CronKey,
    mode: FieldMode,
    params: &'a Params,
    editing: Option<usize>,
    cursor_on: bool,
    theme: &'a Theme,
}

impl SlotView<'_> {
    fn slot(&self, index: usize) -> Span<'static> {
        let raw = self.params.get(index).unwrap_or("");
        if self.editing == Some(index) {
            let mut val = raw.to_string();
            if self.cursor_on {
                val.push('▏');
            }
            return Span::styled(format!("[{val}]"), self.theme.editing_style());
        }
        let shown = match codec::slot_domain(self.key, self.mode, index) {
            ScalarDomain::Weekday => weekday_label(raw),
            ScalarDomain::Numeric { .. } => raw,
        };
        Span::styled(format!("[{shown}]"), self.theme.value_style())
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let unit = self.key.unit();
        match self.mode {
            FieldMode::Every => vec![Span::raw(format!("every {unit}"))],
            FieldMode::Unspecified => vec![Span::raw("not specified")],
            FieldMode::Range => vec![
                Span::raw("from "),
                self.slot(0),
                Span::raw(" to "),
                self.slot(1),
            ],
            FieldMode::Step => vec![
                Span::raw("every "),
                self.slot(1),
                Span::raw(format!(" {unit}(s) starting at ")),
                self.slot(0),
            ],
            FieldMode::List => {
                let Params::List(items) = self.params else {
                    return vec![Span::raw(format!("specific {unit}(s)"))];
                };
                let mut joined = items.join(",");
                if joined.chars().count() > 40 {
                    joined = joined.chars().take(39).collect::<String>() + "…";
                }
                vec![
                    Span::raw(format!("specific {unit}(s): ")),
                    Span::styled(joined, self.theme.value_style()),
                ]
            }
            FieldMode::LastDayOfMonth => vec![Span::raw("last day of the month")],
            FieldMode::LastWeekdayOffset => vec![
                self.slot(0),
                Span::raw(" day(s) before the end of the month"),
            ],
            FieldMode::NearestWeekday => vec![
                Span::raw("nearest weekday to day "),
                self.slot(0),
                Span::raw(" of the month"),
            ],
            FieldMode::LastWeekdayOfMonth => vec![
                Span::raw("last "),
                self.slot(0),
                Span::raw(" of the month"),
            ],
            FieldMode::NthWeekdayOfMonth => vec![
                Span::raw("occurrence "),
                self.slot(0),
                Span::raw(" of "),
                self.slot(1),
                Span::raw(" in the month"),
            ],
        }
    }
}

fn grid_lines(state: &AppState, key: CronKey, checked: &[String]) -> Vec<Line<'static>> {
    let theme = &state.theme;
    let options = key.list_options();
    let total_rows = options.len().div_ceil(OPTION_COLUMNS);
    let cursor_row = state.option_cursor / OPTION_COLUMNS;
    let start = cursor_row.saturating_sub(GRID_ROWS - 1);
    let end = (start + GRID_ROWS).min(total_rows);
    let width = options.iter().map(|o| o.chars().count()).max().unwrap_or(0);
    let mut lines = Vec::new();
    for row in start..end {
        let mut spans = vec![Span::raw("      ")];
        for col in 0..OPTION_COLUMNS {
            let idx = row * OPTION_COLUMNS + col;
            let Some(opt) = options.get(idx) else {
                break;
            };
            let on = checked.contains(opt);
            let chk = if on { "[x]" } else { "[ ]" };
            let st = if state.focus == Focus::Options && idx == state.option_cursor {
                theme.cursor_style()
            } else if on {
                theme.checked_style()
            } else {
                theme.hint_style()
            };
            spans.push(Span::styled(format!("{chk}{opt:<width$}"), st));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    if total_rows > GRID_ROWS {
        lines.push(Line::from(Span::styled(
            format!("      rows {}-{} of {total_rows}", start + 1, end),
            theme.hint_style(),
        )));
    }
    lines
}

pub fn draw_field_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let key = current_key(state);
    let editor = state.session.editor(key);
    let active = editor.mode();
    let cursor_on = state.tick % 2 == 0;
    let mut lines: Vec<Line> = Vec::new();

    if active.is_none() {
        lines.push(Line::from(Span::styled(
            format!(
                "  unrecognized value: {}",
                state.session.field_value(key).unwrap_or("(empty)")
            ),
            theme.error_style(),
        )));
    }

    for (i, mode) in codec::supported_modes(key).iter().copied().enumerate() {
        let locked = state.session.mode_locked(key, mode);
        let is_active = active == Some(mode);
        let sel = if state.focus == Focus::Modes && i == state.mode_cursor {
            '›'
        } else {
            ' '
        };
        let mark = if is_active { "(•)" } else { "( )" };
        let editing = match state.focus {
            Focus::Param(slot) if is_active => Some(slot),
            _ => None,
        };
        let view = SlotView {
            key,
            mode,
            params: editor.params(mode),
            editing,
            cursor_on,
            theme,
        };
        let mut spans = vec![Span::raw(format!("{sel} {mark} "))];
        spans.extend(view.spans());
        spans.push(Span::styled(format!("  {}", mode.symbol()), theme.hint_style()));
        if locked {
            spans.push(Span::styled("  (locked)", theme.locked_style()));
        }
        let mut line = Line::from(spans);
        if sel == '›' {
            line = line.style(Style::default().add_modifier(Modifier::BOLD));
        }
        lines.push(line);

        if mode == FieldMode::List && is_active {
            if let Params::List(items) = editor.params(FieldMode::List) {
                lines.extend(grid_lines(state, key, items));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  field value: {}",
            state.session.field_value(key).unwrap_or("(unset)")
        ),
        theme.hint_style(),
    )));

    let title = match state.focus {
        Focus::Param(_) | Focus::Options => format!("{} · editing", key.label()),
        _ => key.label().to_string(),
    };
    let focused = !matches!(state.focus, Focus::Input);
    let p = Paragraph::new(lines)
        .block(panel_block(&title, focused, theme))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
