use crate::app::{update, AppMsg, Effect};
use crate::cron::session::CronSession;
use crate::model::{is_truthy, AppConfig};
use crate::widgets::expression_input::ExpressionInput;
use crate::widgets::field_panel::draw_field_panel;
use crate::widgets::field_tabs::draw_field_tabs;
use crate::widgets::status_bar::draw_footer;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::{Duration, Instant};

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::CopyToClipboard(text) => {
                let copied = arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(text.clone()))
                    .context("copying to clipboard");
                let follow = match copied {
                    Ok(()) => Effect::ShowToast {
                        text: format!("copied {text}"),
                        level: ToastLevel::Success,
                        seconds: 2,
                    },
                    Err(e) => {
                        log::warn!("{e:#}");
                        Effect::ShowToast {
                            text: "clipboard unavailable".into(),
                            level: ToastLevel::Error,
                            seconds: 3,
                        }
                    }
                };
                run_effects(state, vec![follow]);
            }
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let ticks = seconds.saturating_mul(5); // ~200ms tick
                let exp = state.tick.saturating_add(ticks);
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: exp,
                });
            }
            Effect::Quit => state.quit = true,
        }
    }
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) session: CronSession,
    pub(crate) theme: crate::theme::Theme,
    // Selected field tab (expression index)
    pub(crate) tab: usize,
    pub(crate) focus: Focus,
    pub(crate) mode_cursor: usize,
    pub(crate) option_cursor: usize,
    pub(crate) input: ExpressionInput,
    /// Value last reported through onChange.
    pub(crate) output: Option<String>,
    pub(crate) confirmed: Option<String>,
    pub(crate) changes: usize,
    pub(crate) toast: Option<Toast>,
    pub(crate) tick: u64,
    pub(crate) quit: bool,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    #[default]
    Modes,
    /// Editing one parameter slot of the active mode.
    Param(usize),
    /// List checkbox grid.
    Options,
    Input,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut session = CronSession::new(config.session_options());
        // Mounting with a value is not a change.
        let _ = session.set_whole_expression(config.value.as_deref());
        let mut input = ExpressionInput::new(config.placeholder.as_deref());
        input.set_text(config.value.as_deref().unwrap_or(""));
        let mut state = Self {
            theme: crate::theme::Theme::from_mode(config.theme),
            output: config.value.clone(),
            session,
            input,
            config,
            ..Default::default()
        };
        if state.config.generator_disabled.field_disabled(crate::cron::CronKey::Second) {
            crate::app::cycle_tab(&mut state, true);
        }
        crate::app::reset_cursors(&mut state);
        state
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        crate::services::logger::push(msg);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().is_some_and(|v| is_truthy(&v))
}

pub fn run() -> Result<()> {
    crate::services::logger::init();
    let (cfg, path) = crate::services::config::load()?;
    match &path {
        Some(p) => log::info!("config: {}", p.display()),
        None => log::info!("config: defaults"),
    }
    let mut state = AppState::new(cfg);
    // Headless smoke mode
    let headless = env_flag("CRON_TUI_HEADLESS");
    let headless_ticks: u64 = std::env::var("CRON_TUI_TICKS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);
    let headless_expr: Option<String> = std::env::var("CRON_TUI_HEADLESS_EXPR").ok();
    let headless_summary = env_flag("CRON_TUI_SMOKE_SUMMARY");
    if headless {
        let backend = ratatui::backend::TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend)?;
        let mut expr_done = false;
        for _ in 0..headless_ticks {
            if !expr_done {
                if let Some(expr) = headless_expr.clone() {
                    let effs = update(&mut state, AppMsg::SetExpression(Some(expr)));
                    run_effects(&mut state, effs);
                    if state.session.mode() == crate::cron::assembler::EditMode::Lazy {
                        let effs = update(&mut state, AppMsg::Confirm);
                        run_effects(&mut state, effs);
                    }
                }
                expr_done = true;
            }
            terminal.draw(|f| ui(f, &mut state))?;
            state.tick = state.tick.wrapping_add(1);
        }
        if headless_summary {
            let summary = serde_json::json!({
                "ok": true,
                "expression": state.session.expression(),
                "output": state.output,
                "confirmed": state.confirmed,
                "changes": state.changes,
                "lazy": state.config.lazy,
                "ticks": state.tick,
            });
            println!("{summary}");
        } else if let Some(out) = &state.output {
            println!("{out}");
        }
        return Ok(());
    }
    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let res: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &mut state)) {
            break Err(e.into());
        }
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let effects = if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        vec![Effect::Quit]
                    } else {
                        update(&mut state, AppMsg::Key(key.code))
                    };
                    run_effects(&mut state, effects);
                }
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }
        if state.quit {
            break Ok(());
        }
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    };
    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res?;
    if let Some(out) = &state.output {
        println!("{out}");
    }
    Ok(())
}

fn help_text(state: &AppState) -> &'static str {
    match state.focus {
        Focus::Modes => {
            "Tab/F1-F7 field • ↑/↓ mode • Enter select • i edit • c confirm • y copy • q quit"
        }
        Focus::Param(_) => "type value • ↑/↓ step • ←/→ slot • Enter/Esc done",
        Focus::Options => "←/→/↑/↓ move • Space toggle • a all • o only this • Esc back",
        Focus::Input => "Enter apply • Esc cancel",
    }
}

pub(crate) fn ui(f: &mut Frame, state: &mut AppState) {
    // Clear expired toast
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }

    let screen = f.area();
    f.render_widget(Block::default().style(state.theme.screen_style()), screen);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(screen);

    draw_header(f, rows[0], state);
    draw_field_tabs(f, rows[1], state);
    draw_field_panel(f, rows[2], state);
    let focused = state.focus == Focus::Input;
    let theme = state.theme.clone();
    state.input.render(f, rows[3], focused, &theme);
    draw_debug(f, rows[4], state);
    draw_footer(f, rows[5], state, help_text(state));
}

fn draw_header(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let mut spans = vec![Span::styled(
        " cron-tui ",
        theme.title_style(),
    )];
    let expr = state.session.expression();
    spans.push(Span::styled(
        expr.unwrap_or_else(|| "(no expression)".into()),
        theme.value_style(),
    ));
    if state.config.lazy {
        let pending = state.session.expression() != state.confirmed;
        let tag = if pending { "  unconfirmed" } else { "  confirmed" };
        spans.push(Span::styled(tag, theme.hint_style()));
    }
    if state.session.is_locked() {
        spans.push(Span::styled("  read only", theme.locked_style()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(state.theme.frame))
        .title(Span::styled(
            "Debug",
            Style::default()
                .fg(state.theme.hint)
                .add_modifier(Modifier::BOLD),
        ));
    // Take last `area.height` lines
    let lines: Vec<Line> = crate::services::logger::tail(area.height as usize)
        .into_iter()
        .map(Line::raw)
        .collect();
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
