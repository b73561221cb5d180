use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

pub const MAX_LOG_LINES: usize = 200;

static BUFFER: OnceLock<Mutex<VecDeque<String>>> = OnceLock::new();
static LOGGER: RingLogger = RingLogger;

fn buffer() -> &'static Mutex<VecDeque<String>> {
    BUFFER.get_or_init(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES)))
}

/// Append one line, dropping the oldest once the ring is full.
pub fn push(line: impl Into<String>) {
    let Ok(mut buf) = buffer().lock() else {
        return;
    };
    if buf.len() >= MAX_LOG_LINES {
        buf.pop_front();
    }
    buf.push_back(line.into());
}

/// Last `n` lines, oldest first.
pub fn tail(n: usize) -> Vec<String> {
    let Ok(buf) = buffer().lock() else {
        return Vec::new();
    };
    let start = buf.len().saturating_sub(n);
    buf.iter().skip(start).cloned().collect()
}

struct RingLogger;

impl Log for RingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
            Level::Trace => "TRC",
        };
        push(format!("{tag} {}", record.args()));
    }

    fn flush(&self) {}
}

pub fn level_from_env(raw: Option<&str>) -> LevelFilter {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the ring logger. Level comes from `CRON_TUI_LOG`. Calling this
/// twice keeps the first logger.
pub fn init() {
    let level = level_from_env(std::env::var("CRON_TUI_LOG").ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
