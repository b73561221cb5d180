//! Whole-expression assembly.
//!
//! The assembler owns the 7-slot working list (second .. year). It is the
//! only place where one field's edit may change another field: day-of-month
//! and day-of-week are kept mutually exclusive here.

use super::{conflict_index, DATE_INDEX, DAY_INDEX, FIELD_COUNT, YEAR_INDEX};

/// How edits reach the outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Every settled edit notifies.
    #[default]
    Immediate,
    /// Edits accumulate until [`ExpressionAssembler::confirm`].
    Lazy,
}

/// Notification leaving the assembler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emission {
    Changed(Option<String>),
    Confirmed(Option<String>),
}

pub type Slots = Vec<Option<String>>;

#[derive(Clone, Debug, Default)]
pub struct ExpressionAssembler {
    slots: Slots,
    mode: EditMode,
    last_notified: Option<String>,
}

fn is_blank(v: Option<&String>) -> bool {
    v.map_or(true, |s| s.is_empty())
}

fn is_unspecified(v: Option<&String>) -> bool {
    v.is_some_and(|s| s == "?")
}

/// Cap at 7 slots and drop a trailing year that is `?` or empty, so a
/// 6-field expression and one ending in `?` compare equal.
pub fn trim_slots(mut slots: Slots) -> Slots {
    slots.truncate(FIELD_COUNT);
    if slots.len() > YEAR_INDEX {
        let year = slots.get(YEAR_INDEX).and_then(|v| v.as_ref());
        if is_blank(year) || is_unspecified(year) {
            slots.remove(YEAR_INDEX);
        }
    }
    slots
}

/// Split a whole expression on single spaces into working-list slots.
pub fn split_expression(whole: &str) -> Slots {
    trim_slots(whole.split(' ').map(|t| Some(t.to_string())).collect())
}

/// Keep exactly one of day-of-month / day-of-week unconstrained (`?`) after
/// an edit to either of them. The edited side wins: a constrained edit
/// forces the other side to `?`, and `?` on both sides frees the other one
/// to `*`. Edits to any other slot leave the list unchanged.
pub fn enforce_date_day_exclusivity(mut slots: Slots, edited: usize) -> Slots {
    if edited != DATE_INDEX && edited != DAY_INDEX {
        return slots;
    }
    let other = conflict_index(edited);
    let edited_q = is_unspecified(slots.get(edited).and_then(|v| v.as_ref()));
    let other_q = is_unspecified(slots.get(other).and_then(|v| v.as_ref()));
    if edited_q != other_q {
        return slots;
    }
    if slots.len() <= other {
        slots.resize(other + 1, None);
    }
    let forced = if edited_q { "*" } else { "?" };
    log::debug!("slot {other} forced to {forced} after edit of slot {edited}");
    slots[other] = Some(forced.to_string());
    slots
}

/// Join the working list into a whole expression. Missing fields are written
/// as `*`; the year is left out when missing or `?`. A list without a single
/// non-empty slot has no expression.
pub fn serialize(slots: &[Option<String>]) -> Option<String> {
    if slots.iter().all(|v| is_blank(v.as_ref())) {
        return None;
    }
    let mut out: Vec<&str> = Vec::with_capacity(FIELD_COUNT);
    for index in 0..YEAR_INDEX {
        let value = slots.get(index).and_then(|v| v.as_deref());
        out.push(value.filter(|s| !s.is_empty()).unwrap_or("*"));
    }
    let year = slots.get(YEAR_INDEX).and_then(|v| v.as_ref());
    if let Some(year) = year.filter(|_| !is_blank(year) && !is_unspecified(year)) {
        out.push(year.as_str());
    }
    Some(out.join(" "))
}

impl ExpressionAssembler {
    pub fn new(mode: EditMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|v| v.as_deref())
    }

    /// Current whole expression, regardless of edit mode.
    pub fn expression(&self) -> Option<String> {
        serialize(&self.slots)
    }

    /// Feed an externally supplied expression. The working list is replaced
    /// only when the incoming one differs; `None` is ignored.
    pub fn ingest(&mut self, whole: Option<&str>) -> Option<Emission> {
        let incoming = split_expression(whole?);
        if incoming == self.slots {
            return None;
        }
        log::info!("ingest: {}", whole.unwrap_or_default());
        self.slots = incoming;
        self.notify()
    }

    /// Store one field's new string and reconcile the date/day pair. An
    /// absent or empty value leaves the slot as it was.
    pub fn apply_field_edit(&mut self, index: usize, value: Option<&str>) -> Option<Emission> {
        if index >= FIELD_COUNT {
            log::warn!("field index {index} out of range");
            return None;
        }
        let mut slots = std::mem::take(&mut self.slots);
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            if slots.len() <= index {
                slots.resize(index + 1, None);
            }
            slots[index] = Some(v.to_string());
        }
        self.slots = enforce_date_day_exclusivity(slots, index);
        self.notify()
    }

    /// Lazy mode: trim the list and hand out the final expression once.
    /// Immediate mode has nothing to confirm.
    pub fn confirm(&mut self) -> Vec<Emission> {
        if self.mode != EditMode::Lazy {
            return Vec::new();
        }
        let expression = serialize(&trim_slots(self.slots.clone()));
        log::info!("confirm: {}", expression.as_deref().unwrap_or("<empty>"));
        self.last_notified = expression.clone();
        vec![
            Emission::Confirmed(expression.clone()),
            Emission::Changed(expression),
        ]
    }

    fn notify(&mut self) -> Option<Emission> {
        if self.mode == EditMode::Lazy {
            return None;
        }
        let expression = serialize(&self.slots)?;
        if self.last_notified.as_deref() == Some(expression.as_str()) {
            return None;
        }
        self.last_notified = Some(expression.clone());
        Some(Emission::Changed(Some(expression)))
    }
}
