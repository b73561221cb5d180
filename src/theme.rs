use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::ui::ToastLevel;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

/// Colours by role in the editor: the expression and slot values, the
/// cursor that moves over modes and grid cells, checked list cells and
/// locked modes.
#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub title: Color,
    pub value: Color,
    pub cursor: Color,
    pub frame: Color,
    pub checked: Color,
    pub locked: Color,
    pub error: Color,
    pub hint: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 24, 28),
            fg: Color::Rgb(220, 222, 228),
            title: Color::Rgb(255, 176, 0),
            value: Color::Rgb(80, 200, 200),
            cursor: Color::Rgb(255, 176, 0),
            frame: Color::Rgb(84, 88, 100),
            checked: Color::Rgb(120, 210, 110),
            locked: Color::Rgb(150, 110, 110),
            error: Color::Rgb(240, 80, 80),
            hint: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(248, 247, 242),
            fg: Color::Rgb(28, 28, 32),
            title: Color::Rgb(180, 100, 0),
            value: Color::Rgb(0, 120, 130),
            cursor: Color::Rgb(200, 110, 0),
            frame: Color::Rgb(196, 196, 204),
            checked: Color::Rgb(30, 140, 40),
            locked: Color::Rgb(160, 90, 90),
            error: Color::Rgb(190, 20, 20),
            hint: Color::Rgb(118, 118, 128),
        }
    }

    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.cursor } else { self.frame })
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Expression text and committed slot values.
    pub fn value_style(&self) -> Style {
        Style::default().fg(self.value).add_modifier(Modifier::BOLD)
    }

    /// A slot that is being typed into.
    pub fn editing_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    pub fn checked_style(&self) -> Style {
        Style::default().fg(self.checked)
    }

    pub fn locked_style(&self) -> Style {
        Style::default()
            .fg(self.locked)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn screen_style(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Success => self.checked,
            ToastLevel::Error => self.error,
            ToastLevel::Info => self.value,
        }
    }
}
