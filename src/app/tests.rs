use super::*;
use crate::model::AppConfig;

fn press(st: &mut AppState, keys: &[KeyCode]) -> Vec<Effect> {
    let mut effects = Vec::new();
    for k in keys {
        effects.extend(update(st, AppMsg::Key(*k)));
    }
    effects
}

fn type_text(st: &mut AppState, text: &str) {
    for c in text.chars() {
        let _ = update(st, AppMsg::Key(KeyCode::Char(c)));
    }
}

fn with_config(yaml: &str) -> AppState {
    let cfg: AppConfig = serde_yaml::from_str(yaml).unwrap();
    AppState::new(cfg)
}

#[test]
fn selecting_a_mode_reports_the_whole_expression() {
    let mut st = AppState::default();
    let _ = press(&mut st, &[KeyCode::Enter]);
    assert_eq!(st.output.as_deref(), Some("* * * * * *"));
    assert_eq!(st.changes, 1);
    assert_eq!(st.focus, Focus::Modes);
    assert_eq!(st.input.text(), "* * * * * *");
}

#[test]
fn range_params_clamp_only_on_commit() {
    let mut st = AppState::default();
    let _ = press(&mut st, &[KeyCode::F(3), KeyCode::Down, KeyCode::Enter]);
    assert_eq!(st.output.as_deref(), Some("* * 0-0 * * *"));
    assert_eq!(st.focus, Focus::Param(0));
    type_text(&mut st, "5");
    let _ = press(&mut st, &[KeyCode::Tab]);
    assert_eq!(st.focus, Focus::Param(1));
    type_text(&mut st, "29");
    assert_eq!(st.output.as_deref(), Some("* * 5-29 * * *"));
    let _ = press(&mut st, &[KeyCode::Enter]);
    assert_eq!(st.output.as_deref(), Some("* * 5-23 * * *"));
    assert_eq!(st.focus, Focus::Modes);
}

#[test]
fn backspace_to_empty_reads_as_zero() {
    let mut st = AppState::default();
    let _ = press(&mut st, &[KeyCode::F(2), KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(st.output.as_deref(), Some("* 0/0 * * * *"));
    type_text(&mut st, "7");
    assert_eq!(st.output.as_deref(), Some("* 7/0 * * * *"));
    let _ = press(&mut st, &[KeyCode::Backspace]);
    assert_eq!(st.output.as_deref(), Some("* 0/0 * * * *"));
}

#[test]
fn weekday_slot_steps_around_the_week() {
    let mut st = AppState::default();
    let mut keys = vec![KeyCode::F(6)];
    keys.extend([KeyCode::Down; 3]);
    keys.push(KeyCode::Enter);
    let _ = press(&mut st, &keys);
    assert_eq!(st.output.as_deref(), Some("* * * ? * MONL"));
    let _ = press(&mut st, &[KeyCode::Up]);
    assert_eq!(st.output.as_deref(), Some("* * * ? * TUEL"));
    let _ = press(&mut st, &[KeyCode::Down, KeyCode::Down]);
    assert_eq!(st.output.as_deref(), Some("* * * ? * SUNL"));
}

#[test]
fn list_grid_toggles_but_never_empties() {
    let mut st = AppState::default();
    let mut keys = vec![KeyCode::F(2)];
    keys.extend([KeyCode::Down; 3]);
    keys.push(KeyCode::Enter);
    let _ = press(&mut st, &keys);
    assert_eq!(st.focus, Focus::Options);
    assert_eq!(st.output.as_deref(), Some("* 0 * * * *"));

    let mut keys = vec![KeyCode::Right; 5];
    keys.push(KeyCode::Char(' '));
    let _ = press(&mut st, &keys);
    assert_eq!(st.output.as_deref(), Some("* 0,5 * * * *"));

    let mut keys = vec![KeyCode::Left; 5];
    keys.push(KeyCode::Char(' '));
    let _ = press(&mut st, &keys);
    assert_eq!(st.output.as_deref(), Some("* 5 * * * *"));

    let changes = st.changes;
    let mut keys = vec![KeyCode::Right; 5];
    keys.push(KeyCode::Char(' '));
    let _ = press(&mut st, &keys);
    assert_eq!(st.output.as_deref(), Some("* 5 * * * *"));
    assert_eq!(st.changes, changes);

    let _ = press(&mut st, &[KeyCode::Esc]);
    assert_eq!(st.focus, Focus::Modes);
}

#[test]
fn date_and_day_stay_exclusive_across_tabs() {
    let mut st = AppState::default();
    let mut keys = vec![KeyCode::F(4)];
    keys.extend([KeyCode::Down; 5]);
    keys.push(KeyCode::Enter);
    let _ = press(&mut st, &keys);
    assert_eq!(st.output.as_deref(), Some("* * * L * ?"));

    let _ = press(&mut st, &[KeyCode::F(6)]);
    assert_eq!(st.mode_cursor, 1);
    let _ = press(&mut st, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(st.output.as_deref(), Some("* * * ? * MON#1"));
    let _ = press(&mut st, &[KeyCode::Esc, KeyCode::F(4)]);
    assert_eq!(
        st.session.editor(CronKey::Date).mode(),
        Some(FieldMode::Unspecified)
    );
    assert_eq!(st.mode_cursor, 1);
}

#[test]
fn lazy_mode_reports_only_on_confirm() {
    let mut st = with_config("lazy: true\n");
    let _ = press(&mut st, &[KeyCode::Enter, KeyCode::F(3), KeyCode::Down, KeyCode::Enter]);
    assert_eq!(st.output, None);
    assert_eq!(st.changes, 0);
    let _ = press(&mut st, &[KeyCode::Esc]);
    let effects = press(&mut st, &[KeyCode::Char('c')]);
    assert_eq!(st.confirmed.as_deref(), Some("* * 0-0 * * *"));
    assert_eq!(st.output.as_deref(), Some("* * 0-0 * * *"));
    assert_eq!(st.changes, 1);
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::ShowToast {
            level: ToastLevel::Success,
            ..
        }
    )));
}

#[test]
fn confirm_in_immediate_mode_only_informs() {
    let mut st = AppState::default();
    let effects = update(&mut st, AppMsg::Confirm);
    assert_eq!(st.confirmed, None);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Info,
            ..
        }]
    ));
}

#[test]
fn expression_input_commits_on_enter() {
    let mut st = AppState::default();
    let _ = press(&mut st, &[KeyCode::Char('i')]);
    assert_eq!(st.focus, Focus::Input);
    type_text(&mut st, "0 0 12 * * ?");
    // Nothing leaves the input before Enter.
    assert_eq!(st.output, None);
    let _ = press(&mut st, &[KeyCode::Enter]);
    assert_eq!(st.focus, Focus::Modes);
    assert_eq!(st.output.as_deref(), Some("0 0 12 * * ?"));
    assert_eq!(st.session.field_value(CronKey::Hour), Some("12"));
    assert_eq!(
        st.session.editor(CronKey::Hour).mode(),
        Some(FieldMode::List)
    );
}

#[test]
fn expression_input_escape_restores_the_value() {
    let mut st = with_config("value: '0 0 12 * * ?'\n");
    let _ = press(&mut st, &[KeyCode::Char('i')]);
    type_text(&mut st, " junk");
    let _ = press(&mut st, &[KeyCode::Esc]);
    assert_eq!(st.focus, Focus::Modes);
    assert_eq!(st.input.text(), "0 0 12 * * ?");
    assert_eq!(st.changes, 0);
}

#[test]
fn readonly_blocks_edits_and_input() {
    let mut st = with_config("readonly: true\nvalue: '0 0 12 * * ?'\n");
    let _ = press(&mut st, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(st.changes, 0);
    assert_eq!(st.session.expression().as_deref(), Some("0 0 12 * * ?"));
    let effects = press(&mut st, &[KeyCode::Char('i')]);
    assert_eq!(st.focus, Focus::Modes);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Error,
            ..
        }]
    ));
}

#[test]
fn disabled_fields_are_skipped_by_tab_navigation() {
    let mut st = with_config("generator_disabled: [s, m]\n");
    assert_eq!(st.tab, CronKey::Hour.index());
    let _ = press(&mut st, &[KeyCode::F(1)]);
    assert_eq!(st.tab, CronKey::Hour.index());
    let _ = press(&mut st, &[KeyCode::BackTab]);
    assert_eq!(st.tab, CronKey::Year.index());
    let _ = press(&mut st, &[KeyCode::Tab]);
    assert_eq!(st.tab, CronKey::Hour.index());
}

#[test]
fn locked_mode_shows_an_error() {
    let mut st = with_config("generator_disabled: { second: [range] }\n");
    let effects = press(&mut st, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(st.output, None);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Error,
            ..
        }]
    ));
}

#[test]
fn copy_and_quit_effects() {
    let mut st = with_config("value: '0 0 12 * * ?'\n");
    let effects = press(&mut st, &[KeyCode::Char('y'), KeyCode::Char('q')]);
    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard("0 0 12 * * ?".into()),
            Effect::Quit
        ]
    );
    let mut empty = AppState::default();
    let effects = press(&mut empty, &[KeyCode::Char('y')]);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Info,
            ..
        }]
    ));
}

#[test]
fn step_value_respects_domains() {
    let minute = ScalarDomain::Numeric { min: 0, max: 59 };
    assert_eq!(step_value(minute, "59", 1), "59");
    assert_eq!(step_value(minute, "7", 1), "8");
    assert_eq!(step_value(minute, "abc", -1), "0");
    assert_eq!(step_value(minute, "", 1), "1");
    assert_eq!(step_value(minute, "1e+300", 1), "59");
    assert_eq!(step_value(minute, "-1e+300", -1), "0");
    assert_eq!(step_value(ScalarDomain::Weekday, "SUN", 1), "MON");
    assert_eq!(step_value(ScalarDomain::Weekday, "MON", -1), "SUN");
}

#[test]
fn huge_typed_number_steps_to_the_bound() {
    let mut st = AppState::default();
    let _ = press(&mut st, &[KeyCode::F(3), KeyCode::Down, KeyCode::Enter]);
    type_text(&mut st, "9999999999999999999999");
    let _ = press(&mut st, &[KeyCode::Up]);
    assert_eq!(st.output.as_deref(), Some("* * 23-0 * * *"));
}

#[test]
fn list_grid_selects_all_or_only_the_cursor() {
    let mut st = AppState::default();
    let mut keys = vec![KeyCode::F(6)];
    keys.extend([KeyCode::Down; 4]);
    keys.push(KeyCode::Enter);
    let _ = press(&mut st, &keys);
    assert_eq!(st.focus, Focus::Options);

    let _ = press(&mut st, &[KeyCode::Char('a')]);
    assert_eq!(
        st.output.as_deref(),
        Some("* * * ? * MON,TUE,WED,THU,FRI,SAT,SUN")
    );

    let _ = press(&mut st, &[KeyCode::Right, KeyCode::Right, KeyCode::Char('o')]);
    assert_eq!(st.output.as_deref(), Some("* * * ? * WED"));
}
