//! Field codec: recovers `{mode, params}` from a single field string and
//! writes it back.
//!
//! Parameters stay strings end to end. Parsing never re-pads or converts a
//! numeric substring, and formatting never clamps; clamping happens only when
//! an edit is committed (see [`clamp`] and [`commit_scalar`]).

use super::{is_weekday_code, number, CronKey, ScalarDomain, WEEKDAY_CODES};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Editing strategy of one field. A field whose string matches none of its
/// kind's patterns has no mode at all (`Option<FieldMode>::None`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    /// `*`
    Every,
    /// `?`
    Unspecified,
    /// `a-b`
    Range,
    /// `a/b`
    Step,
    /// `a,b,c`
    List,
    /// `L`
    LastDayOfMonth,
    /// `L-n`
    LastWeekdayOffset,
    /// `nW`
    NearestWeekday,
    /// `wdL`
    LastWeekdayOfMonth,
    /// `wd#n`
    NthWeekdayOfMonth,
}

/// Parameters of one mode. The shape is fixed per mode:
/// Range/Step/NthWeekdayOfMonth carry a pair, List a vector, the offset and
/// weekday modifiers a scalar, and the bare symbols nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Params {
    None,
    Scalar(String),
    Pair(String, String),
    List(Vec<String>),
}

impl Params {
    pub fn pair(a: &str, b: &str) -> Self {
        Params::Pair(a.to_string(), b.to_string())
    }

    pub fn scalar(v: &str) -> Self {
        Params::Scalar(v.to_string())
    }

    pub fn list<S: AsRef<str>>(items: &[S]) -> Self {
        Params::List(items.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Slot `index` of the bundle; scalars answer to any index.
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            Params::None => None,
            Params::Scalar(v) => Some(v),
            Params::Pair(a, b) => match index {
                0 => Some(a),
                1 => Some(b),
                _ => None,
            },
            Params::List(items) => items.get(index).map(String::as_str),
        }
    }

    pub fn slot_count(&self) -> usize {
        match self {
            Params::None => 0,
            Params::Scalar(_) => 1,
            Params::Pair(..) => 2,
            Params::List(items) => items.len(),
        }
    }
}

/// A parsed (or about to be formatted) field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldState {
    pub mode: FieldMode,
    pub params: Params,
}

impl FieldState {
    pub fn new(mode: FieldMode, params: Params) -> Self {
        Self { mode, params }
    }

    pub fn bare(mode: FieldMode) -> Self {
        Self::new(mode, Params::None)
    }
}

impl FieldMode {
    pub fn symbol(self) -> &'static str {
        match self {
            FieldMode::Every => "*",
            FieldMode::Unspecified => "?",
            FieldMode::Range => "-",
            FieldMode::Step => "/",
            FieldMode::List => ",",
            FieldMode::LastDayOfMonth => "L",
            FieldMode::LastWeekdayOffset => "L-n",
            FieldMode::NearestWeekday => "nW",
            FieldMode::LastWeekdayOfMonth => "wdL",
            FieldMode::NthWeekdayOfMonth => "wd#n",
        }
    }

    pub fn has_params(self) -> bool {
        !matches!(
            self,
            FieldMode::Every | FieldMode::Unspecified | FieldMode::LastDayOfMonth
        )
    }
}

/// Modes a field kind offers, in display order.
pub fn supported_modes(key: CronKey) -> &'static [FieldMode] {
    use FieldMode::*;
    match key {
        CronKey::Second | CronKey::Minute | CronKey::Hour | CronKey::Month => {
            &[Every, Range, Step, List]
        }
        CronKey::Date => &[
            Every,
            Unspecified,
            Range,
            Step,
            NearestWeekday,
            LastDayOfMonth,
            LastWeekdayOffset,
            List,
        ],
        CronKey::Day => &[
            Every,
            Unspecified,
            Range,
            NthWeekdayOfMonth,
            LastWeekdayOfMonth,
            List,
        ],
        CronKey::Year => &[Every, Unspecified, Range, Step, List],
    }
}

pub fn supports(key: CronKey, mode: FieldMode) -> bool {
    supported_modes(key).contains(&mode)
}

/// Mode a freshly created editor starts in.
pub fn default_mode(key: CronKey) -> FieldMode {
    match key {
        CronKey::Day | CronKey::Year => FieldMode::Unspecified,
        _ => FieldMode::Every,
    }
}

/// Seed bundle for `mode` before the user (or an incoming string) sets it.
pub fn default_params(key: CronKey, mode: FieldMode) -> Params {
    let (min, _) = key.bounds();
    let first = if key == CronKey::Day {
        WEEKDAY_CODES[0].to_string()
    } else {
        min.to_string()
    };
    match mode {
        FieldMode::Every | FieldMode::Unspecified | FieldMode::LastDayOfMonth => Params::None,
        FieldMode::Range => Params::Pair(first.clone(), first),
        FieldMode::Step => match key {
            CronKey::Year => Params::pair("1970", "1"),
            _ => Params::Pair(first.clone(), first),
        },
        FieldMode::List => Params::list(&[first]),
        FieldMode::LastWeekdayOffset => Params::scalar("0"),
        FieldMode::NearestWeekday => Params::scalar("1"),
        FieldMode::LastWeekdayOfMonth => Params::scalar(WEEKDAY_CODES[0]),
        FieldMode::NthWeekdayOfMonth => Params::pair("1", WEEKDAY_CODES[0]),
    }
}

/// Commit-time domain of slot `index` of `mode`'s params.
pub fn slot_domain(key: CronKey, mode: FieldMode, index: usize) -> ScalarDomain {
    match (key, mode) {
        (CronKey::Day, FieldMode::NthWeekdayOfMonth) if index == 0 => ScalarDomain::numeric(key),
        (CronKey::Day, _) => ScalarDomain::Weekday,
        _ => ScalarDomain::numeric(key),
    }
}

struct Patterns {
    num_range: Regex,
    num_step: Regex,
    num_list: Regex,
    last_offset: Regex,
    nearest: Regex,
    wd_range: Regex,
    wd_list: Regex,
    wd_last: Regex,
    wd_nth: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        // ASCII classes only: `\d` would also match non-ASCII digits.
        let re = |p: &str| Regex::new(p).expect("static field pattern");
        Patterns {
            num_range: re(r"^([0-9]+)-([0-9]+)$"),
            num_step: re(r"^([0-9]+)/([0-9]+)$"),
            num_list: re(r"^([0-9]+,)*[0-9]+$"),
            last_offset: re(r"^L-([0-9]+)$"),
            nearest: re(r"^([0-9]+)W$"),
            wd_range: re(r"^([A-Za-z]{3})-([A-Za-z]{3})$"),
            wd_list: re(r"^([A-Za-z]{3},)*[A-Za-z]{3}$"),
            wd_last: re(r"^([A-Za-z]{3})L$"),
            wd_nth: re(r"^([A-Za-z]{3})#([0-9]+)$"),
        }
    })
}

fn split_list(raw: &str) -> Params {
    Params::List(raw.split(',').map(str::to_string).collect())
}

fn parse_numeric(raw: &str, p: &Patterns) -> Option<FieldState> {
    if let Some(c) = p.num_range.captures(raw) {
        return Some(FieldState::new(FieldMode::Range, Params::pair(&c[1], &c[2])));
    }
    if let Some(c) = p.num_step.captures(raw) {
        return Some(FieldState::new(FieldMode::Step, Params::pair(&c[1], &c[2])));
    }
    if p.num_list.is_match(raw) {
        return Some(FieldState::new(FieldMode::List, split_list(raw)));
    }
    None
}

/// Recover `{mode, params}` from a raw field string; `None` means the string
/// is not recognized for this kind (no mode selected).
pub fn parse(key: CronKey, raw: Option<&str>) -> Option<FieldState> {
    let raw = raw?;
    let p = patterns();
    let parsed = match key {
        CronKey::Day => {
            if let Some(c) = p.wd_range.captures(raw) {
                Some(FieldState::new(FieldMode::Range, Params::pair(&c[1], &c[2])))
            } else if p.wd_list.is_match(raw) {
                Some(FieldState::new(FieldMode::List, split_list(raw)))
            } else if let Some(c) = p.wd_last.captures(raw) {
                Some(FieldState::new(
                    FieldMode::LastWeekdayOfMonth,
                    Params::scalar(&c[1]),
                ))
            } else if let Some(c) = p.wd_nth.captures(raw) {
                // Stored as [index, weekday]; written as weekday#index.
                Some(FieldState::new(
                    FieldMode::NthWeekdayOfMonth,
                    Params::pair(&c[2], &c[1]),
                ))
            } else {
                None
            }
        }
        CronKey::Date => parse_numeric(raw, p).or_else(|| {
            if let Some(c) = p.last_offset.captures(raw) {
                Some(FieldState::new(
                    FieldMode::LastWeekdayOffset,
                    Params::scalar(&c[1]),
                ))
            } else if let Some(c) = p.nearest.captures(raw) {
                Some(FieldState::new(
                    FieldMode::NearestWeekday,
                    Params::scalar(&c[1]),
                ))
            } else if raw == "L" {
                Some(FieldState::bare(FieldMode::LastDayOfMonth))
            } else {
                None
            }
        }),
        _ => parse_numeric(raw, p),
    };
    let parsed = parsed.or(match raw {
        "*" => Some(FieldState::bare(FieldMode::Every)),
        "?" => Some(FieldState::bare(FieldMode::Unspecified)),
        _ => None,
    })?;
    supports(key, parsed.mode).then_some(parsed)
}

/// Serialize `{mode, params}`. Modes the kind does not offer, and params of
/// the wrong shape, have no canonical string and fall back to `*`.
pub fn format(key: CronKey, state: &FieldState) -> String {
    if !supports(key, state.mode) {
        return "*".into();
    }
    match (state.mode, &state.params) {
        (FieldMode::Every, _) => "*".into(),
        (FieldMode::Unspecified, _) => "?".into(),
        (FieldMode::LastDayOfMonth, _) => "L".into(),
        (FieldMode::Range, Params::Pair(a, b)) => format!("{a}-{b}"),
        (FieldMode::Step, Params::Pair(a, b)) => format!("{a}/{b}"),
        (FieldMode::List, Params::List(items)) => items.join(","),
        (FieldMode::LastWeekdayOffset, Params::Scalar(n)) => format!("L-{n}"),
        (FieldMode::NearestWeekday, Params::Scalar(n)) => format!("{n}W"),
        (FieldMode::LastWeekdayOfMonth, Params::Scalar(wd)) => format!("{wd}L"),
        (FieldMode::NthWeekdayOfMonth, Params::Pair(index, wd)) => format!("{wd}#{index}"),
        _ => "*".into(),
    }
}

/// Clamp a scalar string into `[min, max]`. Non-numeric input yields `min`;
/// in-range input is returned untouched (no re-padding).
pub fn clamp(value: &str, min: i64, max: i64) -> String {
    match number::coerce(value) {
        None => min.to_string(),
        Some(n) if n > max as f64 => max.to_string(),
        Some(n) if n < min as f64 => min.to_string(),
        Some(_) => value.to_string(),
    }
}

/// Apply a slot's commit-time domain to `value`.
pub fn commit_scalar(domain: ScalarDomain, value: &str) -> String {
    match domain {
        ScalarDomain::Numeric { min, max } => clamp(value, min, max),
        ScalarDomain::Weekday if is_weekday_code(value) => value.to_string(),
        ScalarDomain::Weekday => WEEKDAY_CODES[0].to_string(),
    }
}
