use crate::cron::assembler::{EditMode, Emission};
use crate::cron::codec::{self, FieldMode};
use crate::cron::editor::FieldAction;
use crate::cron::{number, CronKey, ScalarDomain, FIELD_COUNT, WEEKDAY_CODES};
use crate::ui::{AppState, Focus, ToastLevel};
use crate::widgets::expression_input::InputOutcome;
use crossterm::event::KeyCode;

/// Cells per row of the List checkbox grid.
pub const OPTION_COLUMNS: usize = 10;

pub enum AppMsg {
    Key(KeyCode),
    /// Whole expression committed from the outer input.
    SetExpression(Option<String>),
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CopyToClipboard(String),
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
    Quit,
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        SetExpression(text) => {
            let text = text.filter(|t| !t.trim().is_empty());
            state.dbg(format!("input: {}", text.as_deref().unwrap_or("<empty>")));
            // The outer input reports its own text first, then feeds it back in.
            state.output = text.clone();
            let emissions = state.session.set_whole_expression(text.as_deref());
            apply_emissions(state, emissions, &mut effects);
            state.input.set_text(state.output.as_deref().unwrap_or(""));
            reset_cursors(state);
        }
        Confirm => {
            if state.session.is_locked() {
                effects.push(toast("editor is read only", ToastLevel::Error));
            } else if state.session.mode() == EditMode::Lazy {
                let emissions = state.session.confirm();
                apply_emissions(state, emissions, &mut effects);
                state.focus = Focus::Modes;
            } else {
                effects.push(toast("changes apply immediately", ToastLevel::Info));
            }
        }
        Key(code) => on_key(state, code, &mut effects),
    }
    effects
}

fn toast(text: impl Into<String>, level: ToastLevel) -> Effect {
    Effect::ShowToast {
        text: text.into(),
        level,
        seconds: 3,
    }
}

fn apply_emissions(state: &mut AppState, emissions: Vec<Emission>, effects: &mut Vec<Effect>) {
    for emission in emissions {
        match emission {
            Emission::Changed(value) => {
                state.dbg(format!(
                    "changed: {}",
                    value.as_deref().unwrap_or("<none>")
                ));
                state.input.set_text(value.as_deref().unwrap_or(""));
                state.output = value;
                state.changes += 1;
            }
            Emission::Confirmed(value) => {
                let shown = value.as_deref().unwrap_or("<empty>").to_string();
                state.dbg(format!("confirmed: {shown}"));
                effects.push(toast(format!("confirmed {shown}"), ToastLevel::Success));
                state.confirmed = value;
            }
        }
    }
}

pub(crate) fn current_key(state: &AppState) -> CronKey {
    CronKey::from_index(state.tab).unwrap_or(CronKey::Second)
}

fn tab_hidden(state: &AppState, index: usize) -> bool {
    CronKey::from_index(index)
        .map(|k| state.config.generator_disabled.field_disabled(k))
        .unwrap_or(true)
}

/// Park the mode cursor on the active mode and the grid cursor on the first
/// checked value of the current tab.
pub(crate) fn reset_cursors(state: &mut AppState) {
    let key = current_key(state);
    let editor = state.session.editor(key);
    let modes = codec::supported_modes(key);
    state.mode_cursor = editor
        .mode()
        .and_then(|m| modes.iter().position(|x| *x == m))
        .unwrap_or(0);
    let options = key.list_options();
    state.option_cursor = editor
        .params(FieldMode::List)
        .get(0)
        .and_then(|first| options.iter().position(|o| o == first))
        .unwrap_or(0);
    if matches!(state.focus, Focus::Param(_) | Focus::Options) {
        state.focus = Focus::Modes;
    }
}

fn select_tab(state: &mut AppState, index: usize) {
    if index >= FIELD_COUNT || tab_hidden(state, index) || index == state.tab {
        return;
    }
    state.tab = index;
    state.focus = Focus::Modes;
    reset_cursors(state);
}

pub(crate) fn cycle_tab(state: &mut AppState, forward: bool) {
    for step in 1..FIELD_COUNT {
        let index = if forward {
            (state.tab + step) % FIELD_COUNT
        } else {
            (state.tab + FIELD_COUNT - step) % FIELD_COUNT
        };
        if !tab_hidden(state, index) {
            select_tab(state, index);
            return;
        }
    }
}

fn edit(state: &mut AppState, action: FieldAction, effects: &mut Vec<Effect>) {
    let key = current_key(state);
    let emissions = state.session.edit(key, action);
    apply_emissions(state, emissions, effects);
}

fn on_key(state: &mut AppState, code: KeyCode, effects: &mut Vec<Effect>) {
    match state.focus {
        Focus::Input => on_input_key(state, code, effects),
        Focus::Param(slot) => on_param_key(state, slot, code, effects),
        Focus::Options => on_options_key(state, code, effects),
        Focus::Modes => on_modes_key(state, code, effects),
    }
}

fn on_input_key(state: &mut AppState, code: KeyCode, effects: &mut Vec<Effect>) {
    match state.input.on_key(code) {
        InputOutcome::Editing => {}
        InputOutcome::Cancel => {
            state.focus = Focus::Modes;
            state.input.set_text(state.output.as_deref().unwrap_or(""));
        }
        InputOutcome::Commit(text) => {
            state.focus = Focus::Modes;
            effects.extend(update(state, AppMsg::SetExpression(Some(text))));
        }
    }
}

/// Keys shared by the mode list and the checkbox grid.
fn on_global_key(state: &mut AppState, code: KeyCode, effects: &mut Vec<Effect>) -> bool {
    match code {
        KeyCode::Char('q') => effects.push(Effect::Quit),
        KeyCode::Tab => cycle_tab(state, true),
        KeyCode::BackTab => cycle_tab(state, false),
        KeyCode::F(n) if (1..=FIELD_COUNT as u8).contains(&n) => select_tab(state, (n - 1) as usize),
        KeyCode::Char('i') => {
            if state.session.is_locked() {
                effects.push(toast("editor is read only", ToastLevel::Error));
            } else {
                state.focus = Focus::Input;
            }
        }
        KeyCode::Char('c') => effects.extend(update(state, AppMsg::Confirm)),
        KeyCode::Char('y') => match state.output.clone().or_else(|| state.session.expression()) {
            Some(expr) => effects.push(Effect::CopyToClipboard(expr)),
            None => effects.push(toast("nothing to copy", ToastLevel::Info)),
        },
        _ => return false,
    }
    true
}

fn on_modes_key(state: &mut AppState, code: KeyCode, effects: &mut Vec<Effect>) {
    if on_global_key(state, code, effects) {
        return;
    }
    let key = current_key(state);
    let modes = codec::supported_modes(key);
    match code {
        KeyCode::Esc => effects.push(Effect::Quit),
        KeyCode::Up => state.mode_cursor = state.mode_cursor.saturating_sub(1),
        KeyCode::Down => {
            state.mode_cursor = (state.mode_cursor + 1).min(modes.len().saturating_sub(1))
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
            let Some(mode) = modes.get(state.mode_cursor).copied() else {
                return;
            };
            if state.session.mode_locked(key, mode) {
                effects.push(toast(
                    format!("{} is locked", key.label()),
                    ToastLevel::Error,
                ));
                return;
            }
            edit(state, FieldAction::SelectMode(mode), effects);
            if state.session.editor(key).mode() != Some(mode) {
                return;
            }
            if mode == FieldMode::List {
                reset_cursors(state);
                state.focus = Focus::Options;
            } else if mode.has_params() {
                state.focus = Focus::Param(0);
            }
        }
        _ => {}
    }
}

/// Next value of a parameter slot for Up/Down: numbers move by one inside
/// their domain, weekday codes wrap around the week.
pub(crate) fn step_value(domain: ScalarDomain, current: &str, dir: i64) -> String {
    match domain {
        ScalarDomain::Weekday => {
            let at = WEEKDAY_CODES
                .iter()
                .position(|c| *c == current)
                .unwrap_or(0) as i64;
            WEEKDAY_CODES[(at + dir).rem_euclid(WEEKDAY_CODES.len() as i64) as usize].to_string()
        }
        ScalarDomain::Numeric { min, max } => {
            let cur = number::coerce(current)
                .filter(|n| n.is_finite())
                .map(|n| (n.round() as i64).clamp(min, max))
                .unwrap_or(min);
            cur.saturating_add(dir).clamp(min, max).to_string()
        }
    }
}

fn on_param_key(state: &mut AppState, slot: usize, code: KeyCode, effects: &mut Vec<Effect>) {
    let key = current_key(state);
    let editor = state.session.editor(key);
    let Some(mode) = editor.mode().filter(|m| m.has_params() && *m != FieldMode::List) else {
        state.focus = Focus::Modes;
        return;
    };
    let params = editor.params(mode);
    let slots = params.slot_count().max(1);
    let current = params.get(slot).unwrap_or_default().to_string();
    let param = |value: String, commit: bool| FieldAction::EditParam {
        mode,
        index: slot,
        value,
        commit,
    };
    match code {
        KeyCode::Char(c) => {
            let mut value = current;
            value.push(c);
            edit(state, param(value, false), effects);
        }
        KeyCode::Backspace => {
            let mut value = current;
            value.pop();
            edit(state, param(value, false), effects);
        }
        KeyCode::Up | KeyCode::Down => {
            let dir = if code == KeyCode::Up { 1 } else { -1 };
            let next = step_value(codec::slot_domain(key, mode, slot), &current, dir);
            edit(state, param(next, true), effects);
        }
        KeyCode::Tab | KeyCode::Right => {
            edit(state, param(current, true), effects);
            state.focus = Focus::Param((slot + 1) % slots);
        }
        KeyCode::BackTab | KeyCode::Left => {
            edit(state, param(current, true), effects);
            state.focus = Focus::Param((slot + slots - 1) % slots);
        }
        KeyCode::Enter | KeyCode::Esc => {
            edit(state, param(current, true), effects);
            state.focus = Focus::Modes;
        }
        _ => {}
    }
}

fn on_options_key(state: &mut AppState, code: KeyCode, effects: &mut Vec<Effect>) {
    if on_global_key(state, code, effects) {
        return;
    }
    let key = current_key(state);
    let options = key.list_options();
    let last = options.len().saturating_sub(1);
    match code {
        KeyCode::Esc | KeyCode::Backspace => state.focus = Focus::Modes,
        KeyCode::Left => state.option_cursor = state.option_cursor.saturating_sub(1),
        KeyCode::Right => state.option_cursor = (state.option_cursor + 1).min(last),
        KeyCode::Up => state.option_cursor = state.option_cursor.saturating_sub(OPTION_COLUMNS),
        KeyCode::Down => state.option_cursor = (state.option_cursor + OPTION_COLUMNS).min(last),
        KeyCode::Home => state.option_cursor = 0,
        KeyCode::End => state.option_cursor = last,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(value) = options.get(state.option_cursor).cloned() {
                edit(state, FieldAction::ToggleListItem(value), effects);
            }
        }
        KeyCode::Char('a') => edit(state, FieldAction::SetList(options), effects),
        KeyCode::Char('o') => {
            if let Some(value) = options.get(state.option_cursor).cloned() {
                edit(state, FieldAction::SetList(vec![value]), effects);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests;
