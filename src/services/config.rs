use crate::model::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cron-tui.yaml";

fn read_config(path: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
    let cfg: AppConfig =
        serde_yaml::from_str(&s).with_context(|| format!("parsing {path:?}"))?;
    Ok(cfg)
}

/// Look for `cron-tui.yaml` in `cwd`, `cwd/.tui`, every ancestor's `.tui`
/// and finally `home/.tui`.
pub fn discover(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let candidates = [cwd.join(CONFIG_FILE), cwd.join(".tui").join(CONFIG_FILE)];
    if let Some(p) = candidates.into_iter().find(|p| p.exists()) {
        return Some(p);
    }
    let mut cur = cwd;
    while let Some(parent) = cur.parent() {
        let p = parent.join(".tui").join(CONFIG_FILE);
        if p.exists() {
            return Some(p);
        }
        cur = parent;
    }
    home.map(|h| h.join(".tui").join(CONFIG_FILE))
        .filter(|p| p.exists())
}

/// Load the config anchored by `CRON_TUI_CONFIG_DIR`, or the first one found
/// by [`discover`]. No file at all yields the defaults. Environment
/// overrides are applied last.
pub fn load() -> Result<(AppConfig, Option<PathBuf>)> {
    let (cfg, path) = if let Ok(base) = std::env::var("CRON_TUI_CONFIG_DIR") {
        let entry = PathBuf::from(&base).join(CONFIG_FILE);
        (read_config(&entry)?, Some(entry))
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let home = std::env::var("HOME")
            .ok()
            .or_else(|| std::env::var("USERPROFILE").ok())
            .map(PathBuf::from);
        match discover(&cwd, home.as_deref()) {
            Some(p) => (read_config(&p)?, Some(p)),
            None => (AppConfig::default(), None),
        }
    };
    let cfg = cfg.with_overrides(
        std::env::var("CRON_TUI_VALUE").ok(),
        std::env::var("CRON_TUI_LAZY").ok(),
    );
    crate::model::validate_app_config(&cfg).map_err(anyhow::Error::msg)?;
    Ok((cfg, path))
}
