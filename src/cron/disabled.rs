use super::codec::FieldMode;
use super::CronKey;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Which parts of the editor refuse interaction. Written in YAML as `true`,
/// a list of fields, or a map from field to the modes that are locked:
///
/// ```yaml
/// generator_disabled: [second, year]
/// generator_disabled: { day: [nth_weekday_of_month, last_weekday_of_month] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DisableMap {
    All(bool),
    Fields(Vec<CronKey>),
    Modes(BTreeMap<CronKey, Vec<FieldMode>>),
}

impl DisableMap {
    /// The whole field (its tab) is locked.
    pub fn field_disabled(&self, key: CronKey) -> bool {
        match self {
            DisableMap::All(all) => *all,
            DisableMap::Fields(keys) => keys.contains(&key),
            DisableMap::Modes(_) => false,
        }
    }

    /// `mode` cannot be selected or edited within `key`.
    pub fn mode_disabled(&self, key: CronKey, mode: FieldMode) -> bool {
        match self {
            DisableMap::Modes(map) => map.get(&key).is_some_and(|modes| modes.contains(&mode)),
            _ => self.field_disabled(key),
        }
    }
}

impl Default for DisableMap {
    fn default() -> Self {
        DisableMap::All(false)
    }
}
