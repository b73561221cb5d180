//! Field-editing engine for 7-field quartz-style cron expressions.
//!
//! Data flows one way per edit: a field editor turns user actions into a
//! field string, the assembler folds that string into the 7-slot working
//! list (applying the date/day-of-week conflict rule) and serializes the
//! list back into a whole expression.

pub mod assembler;
pub mod codec;
pub mod disabled;
pub mod editor;
pub mod number;
pub mod session;

use serde::Deserialize;

/// Number of positional fields in an expression (year included).
pub const FIELD_COUNT: usize = 7;
pub const DATE_INDEX: usize = 3;
pub const DAY_INDEX: usize = 5;
pub const YEAR_INDEX: usize = 6;

/// Weekday codes in Monday-first order, as written in expressions.
pub const WEEKDAY_CODES: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The seven field kinds, in expression order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CronKey {
    #[serde(alias = "s")]
    Second,
    #[serde(alias = "m")]
    Minute,
    #[serde(alias = "h")]
    Hour,
    #[serde(alias = "d")]
    Date,
    #[serde(alias = "M")]
    Month,
    #[serde(alias = "D")]
    Day,
    #[serde(alias = "y")]
    Year,
}

impl CronKey {
    pub const ALL: [CronKey; FIELD_COUNT] = [
        CronKey::Second,
        CronKey::Minute,
        CronKey::Hour,
        CronKey::Date,
        CronKey::Month,
        CronKey::Day,
        CronKey::Year,
    ];

    pub fn index(self) -> usize {
        match self {
            CronKey::Second => 0,
            CronKey::Minute => 1,
            CronKey::Hour => 2,
            CronKey::Date => 3,
            CronKey::Month => 4,
            CronKey::Day => 5,
            CronKey::Year => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<CronKey> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            CronKey::Second => "Second",
            CronKey::Minute => "Minute",
            CronKey::Hour => "Hour",
            CronKey::Date => "Day of month",
            CronKey::Month => "Month",
            CronKey::Day => "Day of week",
            CronKey::Year => "Year",
        }
    }

    /// Singular unit used in mode descriptions ("every second", "from 3 to 5 hour").
    pub fn unit(self) -> &'static str {
        match self {
            CronKey::Second => "second",
            CronKey::Minute => "minute",
            CronKey::Hour => "hour",
            CronKey::Date => "day",
            CronKey::Month => "month",
            CronKey::Day => "weekday",
            CronKey::Year => "year",
        }
    }

    /// Inclusive numeric domain of the kind's scalars. Day has no numeric
    /// scalars except the `#` occurrence index, see [`ScalarDomain`].
    pub fn bounds(self) -> (i64, i64) {
        match self {
            CronKey::Second | CronKey::Minute => (0, 59),
            CronKey::Hour => (0, 23),
            CronKey::Date => (1, 31),
            CronKey::Month => (1, 12),
            CronKey::Day => (1, 4),
            CronKey::Year => (1970, 3000),
        }
    }

    /// Values offered by the List checkbox grid.
    pub fn list_options(self) -> Vec<String> {
        match self {
            CronKey::Day => WEEKDAY_CODES.iter().map(|s| s.to_string()).collect(),
            _ => {
                let (min, max) = self.bounds();
                (min..=max).map(|n| n.to_string()).collect()
            }
        }
    }
}

/// Commit-time domain of one parameter slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarDomain {
    Numeric { min: i64, max: i64 },
    Weekday,
}

impl ScalarDomain {
    pub fn numeric(key: CronKey) -> Self {
        let (min, max) = key.bounds();
        ScalarDomain::Numeric { min, max }
    }
}

pub fn is_weekday_code(value: &str) -> bool {
    WEEKDAY_CODES.contains(&value)
}

pub fn weekday_label(code: &str) -> &str {
    WEEKDAY_CODES
        .iter()
        .position(|c| *c == code)
        .map(|i| WEEKDAY_LABELS[i])
        .unwrap_or(code)
}

/// The other half of the date/day-of-week pair.
pub fn conflict_index(index: usize) -> usize {
    if index == DATE_INDEX {
        DAY_INDEX
    } else {
        DATE_INDEX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_in_expression_order() {
        for (i, k) in CronKey::ALL.iter().enumerate() {
            assert_eq!(k.index(), i);
            assert_eq!(CronKey::from_index(i), Some(*k));
        }
        assert_eq!(CronKey::from_index(7), None);
    }

    #[test]
    fn list_options_cover_the_domain() {
        assert_eq!(CronKey::Second.list_options().len(), 60);
        assert_eq!(CronKey::Hour.list_options().last().map(String::as_str), Some("23"));
        assert_eq!(CronKey::Date.list_options().first().map(String::as_str), Some("1"));
        assert_eq!(CronKey::Month.list_options().len(), 12);
        assert_eq!(CronKey::Day.list_options()[6], "SUN");
        assert_eq!(CronKey::Year.list_options().len(), 1031);
    }

    #[test]
    fn conflict_index_pairs_date_and_day() {
        assert_eq!(conflict_index(DATE_INDEX), DAY_INDEX);
        assert_eq!(conflict_index(DAY_INDEX), DATE_INDEX);
    }

    #[test]
    fn keys_deserialize_from_long_and_short_names() {
        let keys: Vec<CronKey> = serde_yaml::from_str("[second, D, d, M, year]").unwrap();
        assert_eq!(
            keys,
            vec![
                CronKey::Second,
                CronKey::Day,
                CronKey::Date,
                CronKey::Month,
                CronKey::Year
            ]
        );
    }
}
