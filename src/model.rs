use crate::cron::assembler::EditMode;
use crate::cron::disabled::DisableMap;
use crate::cron::session::SessionOptions;
use crate::theme::ThemeMode;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Initial whole expression.
    pub value: Option<String>,
    /// Accumulate edits until confirmed.
    pub lazy: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub generator_disabled: DisableMap,
    // Shown in the expression input while it is empty
    pub placeholder: Option<String>,
    pub theme: ThemeMode,
}

impl AppConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            mode: if self.lazy {
                EditMode::Lazy
            } else {
                EditMode::Immediate
            },
            generator_disabled: self.generator_disabled.clone(),
            locked: self.disabled || self.readonly,
        }
    }

    /// Apply `CRON_TUI_VALUE` / `CRON_TUI_LAZY` style overrides.
    pub fn with_overrides(mut self, value: Option<String>, lazy: Option<String>) -> Self {
        if let Some(v) = value {
            self.value = Some(v);
        }
        if let Some(l) = lazy {
            self.lazy = is_truthy(&l);
        }
        self
    }
}

pub(crate) fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

pub(crate) fn validate_app_config(cfg: &AppConfig) -> Result<(), String> {
    if let Some(v) = &cfg.value {
        let fields = v.split(' ').count();
        if !(6..=7).contains(&fields) {
            return Err(format!(
                "value '{v}' has {fields} space-separated fields, expected 6 or 7"
            ));
        }
    }
    if let DisableMap::Modes(map) = &cfg.generator_disabled {
        for (key, modes) in map {
            if let Some(m) = modes
                .iter()
                .find(|m| !crate::cron::codec::supports(*key, **m))
            {
                return Err(format!(
                    "generator_disabled: {key:?} has no {m:?} mode to disable"
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cron::CronKey;

    #[test]
    fn empty_yaml_gives_defaults() {
        let cfg: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.value, None);
        assert!(!cfg.lazy);
        assert_eq!(cfg.generator_disabled, DisableMap::All(false));
        assert_eq!(cfg.theme, ThemeMode::Dark);
        let opts = cfg.session_options();
        assert_eq!(opts.mode, EditMode::Immediate);
        assert!(!opts.locked);
    }

    #[test]
    fn full_yaml_maps_to_session_options() {
        let cfg: AppConfig = serde_yaml::from_str(
            "value: '0 0 12 * * ?'\nlazy: true\nreadonly: true\ntheme: light\ngenerator_disabled: [s, y]\n",
        )
        .unwrap();
        assert_eq!(cfg.value.as_deref(), Some("0 0 12 * * ?"));
        assert_eq!(cfg.theme, ThemeMode::Light);
        let opts = cfg.session_options();
        assert_eq!(opts.mode, EditMode::Lazy);
        assert!(opts.locked);
        assert!(opts.generator_disabled.field_disabled(CronKey::Year));
    }

    #[test]
    fn env_overrides_win() {
        let cfg = AppConfig::default().with_overrides(Some("* * * * * ?".into()), Some("yes".into()));
        assert_eq!(cfg.value.as_deref(), Some("* * * * * ?"));
        assert!(cfg.lazy);
        let cfg = cfg.with_overrides(None, Some("0".into()));
        assert!(!cfg.lazy);
        assert_eq!(cfg.value.as_deref(), Some("* * * * * ?"));
    }

    #[test]
    fn validate_rejects_short_value() {
        let cfg = AppConfig {
            value: Some("* * *".into()),
            ..Default::default()
        };
        let err = validate_app_config(&cfg).unwrap_err();
        assert!(err.contains("expected 6 or 7"));
    }

    #[test]
    fn validate_rejects_modes_the_field_lacks() {
        let cfg: AppConfig =
            serde_yaml::from_str("generator_disabled: { month: [last_day_of_month] }").unwrap();
        let err = validate_app_config(&cfg).unwrap_err();
        assert!(err.contains("Month"));
        let cfg: AppConfig =
            serde_yaml::from_str("generator_disabled: { date: [last_day_of_month] }").unwrap();
        assert!(validate_app_config(&cfg).is_ok());
    }
}
