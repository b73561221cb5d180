//! Per-field editing state machine.
//!
//! An editor keeps one parameter bundle per mode, so switching from Range to
//! Step and back restores the numbers last entered for Range. Only the active
//! mode's bundle is ever serialized.

use super::codec::{self, FieldMode, FieldState, Params};
use super::{number, CronKey};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldAction {
    SelectMode(FieldMode),
    /// Change one slot of `mode`'s bundle. `commit` is set when the input
    /// loses focus; only then is the slot clamped to its domain.
    EditParam {
        mode: FieldMode,
        index: usize,
        value: String,
        commit: bool,
    },
    /// Replace the List bundle wholesale (checkbox group change).
    SetList(Vec<String>),
    /// Check or uncheck one List value.
    ToggleListItem(String),
}

#[derive(Clone, Debug)]
pub struct FieldEditor {
    key: CronKey,
    mode: Option<FieldMode>,
    bundles: BTreeMap<FieldMode, Params>,
    last_emitted: Option<String>,
}

impl FieldEditor {
    pub fn new(key: CronKey) -> Self {
        let bundles = codec::supported_modes(key)
            .iter()
            .map(|m| (*m, codec::default_params(key, *m)))
            .collect();
        let mut editor = Self {
            key,
            mode: Some(codec::default_mode(key)),
            bundles,
            last_emitted: None,
        };
        editor.last_emitted = editor.project();
        editor
    }

    /// Active mode; `None` when the last synced string was not recognized.
    pub fn mode(&self) -> Option<FieldMode> {
        self.mode
    }

    pub fn params(&self, mode: FieldMode) -> &Params {
        static NONE: Params = Params::None;
        self.bundles.get(&mode).unwrap_or(&NONE)
    }

    /// Re-derive the editor from an external field string. Never emits: the
    /// string already is the field's value.
    pub fn sync(&mut self, raw: Option<&str>) {
        match codec::parse(self.key, raw) {
            Some(FieldState { mode, params }) => {
                if mode.has_params() {
                    self.bundles.insert(mode, params);
                }
                self.mode = Some(mode);
            }
            None => self.mode = None,
        }
        self.last_emitted = self.project();
    }

    /// The field string the current state stands for.
    pub fn project(&self) -> Option<String> {
        let mode = self.mode?;
        let state = FieldState::new(mode, self.params(mode).clone());
        Some(codec::format(self.key, &state))
    }

    /// Apply one edit. Returns the new field string when the projection
    /// changed since the last emission.
    pub fn apply(&mut self, action: FieldAction) -> Option<String> {
        if !self.reduce(action) {
            return None;
        }
        let next = self.project();
        if next.is_none() || next == self.last_emitted {
            return None;
        }
        self.last_emitted = next.clone();
        next
    }

    fn reduce(&mut self, action: FieldAction) -> bool {
        match action {
            FieldAction::SelectMode(mode) => {
                if !codec::supports(self.key, mode) {
                    log::warn!("{:?}: mode {:?} not offered", self.key, mode);
                    return false;
                }
                self.mode = Some(mode);
                true
            }
            FieldAction::EditParam {
                mode,
                index,
                value,
                commit,
            } => {
                let key = self.key;
                let normalized = number::normalize(&value).unwrap_or(value);
                let stored = if commit {
                    let clamped =
                        codec::commit_scalar(codec::slot_domain(key, mode, index), &normalized);
                    if clamped != normalized {
                        log::debug!("{key:?}: {:?}[{index}] {normalized} -> {clamped}", mode);
                    }
                    clamped
                } else {
                    normalized
                };
                let Some(bundle) = self.bundles.get_mut(&mode) else {
                    return false;
                };
                match bundle {
                    Params::Scalar(v) => *v = stored,
                    Params::Pair(a, _) if index == 0 => *a = stored,
                    Params::Pair(_, b) if index == 1 => *b = stored,
                    Params::List(items) if index < items.len() => items[index] = stored,
                    _ => return false,
                }
                true
            }
            FieldAction::SetList(values) => {
                if values.is_empty() {
                    return false;
                }
                let values = values
                    .into_iter()
                    .map(|v| number::normalize(&v).unwrap_or(v))
                    .collect();
                match self.bundles.get_mut(&FieldMode::List) {
                    Some(bundle) => {
                        *bundle = Params::List(values);
                        true
                    }
                    None => false,
                }
            }
            FieldAction::ToggleListItem(value) => {
                let Some(Params::List(items)) = self.bundles.get_mut(&FieldMode::List) else {
                    return false;
                };
                match items.iter().position(|v| *v == value) {
                    // A list never goes empty.
                    Some(_) if items.len() == 1 => false,
                    Some(pos) => {
                        items.remove(pos);
                        true
                    }
                    None => {
                        items.push(value);
                        true
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(mode: FieldMode, index: usize, value: &str, commit: bool) -> FieldAction {
        FieldAction::EditParam {
            mode,
            index,
            value: value.into(),
            commit,
        }
    }

    #[test]
    fn new_editor_starts_in_kind_default() {
        assert_eq!(FieldEditor::new(CronKey::Second).project().as_deref(), Some("*"));
        assert_eq!(FieldEditor::new(CronKey::Day).project().as_deref(), Some("?"));
        assert_eq!(FieldEditor::new(CronKey::Year).project().as_deref(), Some("?"));
    }

    #[test]
    fn selecting_a_mode_emits_its_seeded_bundle() {
        let mut ed = FieldEditor::new(CronKey::Date);
        assert_eq!(
            ed.apply(FieldAction::SelectMode(FieldMode::LastWeekdayOffset)).as_deref(),
            Some("L-0")
        );
        assert_eq!(
            ed.apply(FieldAction::SelectMode(FieldMode::NearestWeekday)).as_deref(),
            Some("1W")
        );
        assert_eq!(
            ed.apply(FieldAction::SelectMode(FieldMode::LastDayOfMonth)).as_deref(),
            Some("L")
        );
    }

    #[test]
    fn mode_switch_keeps_other_bundles() {
        let mut ed = FieldEditor::new(CronKey::Minute);
        ed.apply(FieldAction::SelectMode(FieldMode::Range));
        ed.apply(edit(FieldMode::Range, 1, "30", true));
        ed.apply(FieldAction::SelectMode(FieldMode::Step));
        assert_eq!(
            ed.apply(edit(FieldMode::Step, 1, "5", true)).as_deref(),
            Some("0/5")
        );
        assert_eq!(
            ed.apply(FieldAction::SelectMode(FieldMode::Range)).as_deref(),
            Some("0-30")
        );
    }

    #[test]
    fn typing_is_not_clamped_until_commit() {
        let mut ed = FieldEditor::new(CronKey::Hour);
        ed.apply(FieldAction::SelectMode(FieldMode::Range));
        assert_eq!(
            ed.apply(edit(FieldMode::Range, 1, "99", false)).as_deref(),
            Some("0-99")
        );
        assert_eq!(
            ed.apply(edit(FieldMode::Range, 1, "99", true)).as_deref(),
            Some("0-23")
        );
        assert_eq!(
            ed.apply(edit(FieldMode::Range, 0, "007", false)).as_deref(),
            Some("7-23")
        );
        assert_eq!(
            ed.apply(edit(FieldMode::Range, 0, "", true)).as_deref(),
            Some("0-23")
        );
    }

    #[test]
    fn editing_an_inactive_mode_does_not_emit() {
        let mut ed = FieldEditor::new(CronKey::Second);
        assert_eq!(ed.apply(edit(FieldMode::Step, 0, "10", true)), None);
        assert_eq!(
            ed.apply(FieldAction::SelectMode(FieldMode::Step)).as_deref(),
            Some("10/0")
        );
    }

    #[test]
    fn reselecting_the_same_mode_is_silent() {
        let mut ed = FieldEditor::new(CronKey::Month);
        assert_eq!(ed.apply(FieldAction::SelectMode(FieldMode::Range)).as_deref(), Some("1-1"));
        assert_eq!(ed.apply(FieldAction::SelectMode(FieldMode::Range)), None);
    }

    #[test]
    fn unsupported_modes_are_ignored() {
        let mut ed = FieldEditor::new(CronKey::Second);
        assert_eq!(ed.apply(FieldAction::SelectMode(FieldMode::Unspecified)), None);
        assert_eq!(ed.mode(), Some(FieldMode::Every));
    }

    #[test]
    fn sync_recovers_mode_and_params_without_emitting() {
        let mut ed = FieldEditor::new(CronKey::Day);
        ed.sync(Some("FRI#3"));
        assert_eq!(ed.mode(), Some(FieldMode::NthWeekdayOfMonth));
        assert_eq!(ed.params(FieldMode::NthWeekdayOfMonth), &Params::pair("3", "FRI"));
        assert_eq!(ed.apply(FieldAction::SelectMode(FieldMode::NthWeekdayOfMonth)), None);
        assert_eq!(
            ed.apply(edit(FieldMode::NthWeekdayOfMonth, 0, "7", true)).as_deref(),
            Some("FRI#4")
        );
    }

    #[test]
    fn unrecognized_sync_leaves_nothing_selected() {
        let mut ed = FieldEditor::new(CronKey::Date);
        ed.sync(Some("bogus"));
        assert_eq!(ed.mode(), None);
        assert_eq!(ed.project(), None);
        ed.sync(None);
        assert_eq!(ed.mode(), None);
        assert_eq!(ed.apply(FieldAction::SelectMode(FieldMode::Every)).as_deref(), Some("*"));
    }

    #[test]
    fn list_toggles_keep_selection_order_and_never_empty() {
        let mut ed = FieldEditor::new(CronKey::Day);
        ed.apply(FieldAction::SelectMode(FieldMode::List));
        assert_eq!(
            ed.apply(FieldAction::ToggleListItem("FRI".into())).as_deref(),
            Some("MON,FRI")
        );
        assert_eq!(
            ed.apply(FieldAction::ToggleListItem("MON".into())).as_deref(),
            Some("FRI")
        );
        assert_eq!(ed.apply(FieldAction::ToggleListItem("FRI".into())), None);
        assert_eq!(ed.apply(FieldAction::SetList(Vec::new())), None);
        assert_eq!(
            ed.apply(FieldAction::SetList(vec!["WED".into(), "SUN".into()])).as_deref(),
            Some("WED,SUN")
        );
    }

    #[test]
    fn weekday_slots_snap_on_commit() {
        let mut ed = FieldEditor::new(CronKey::Day);
        ed.apply(FieldAction::SelectMode(FieldMode::LastWeekdayOfMonth));
        assert_eq!(
            ed.apply(edit(FieldMode::LastWeekdayOfMonth, 0, "XYZ", true)),
            None
        );
        assert_eq!(
            ed.apply(edit(FieldMode::LastWeekdayOfMonth, 0, "SAT", true)).as_deref(),
            Some("SATL")
        );
    }
}
