use once_cell::sync::OnceCell;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub subtitle: Style,
    pub focused: Style,
    pub placeholder: Style,
    pub value: Style,
    pub button_enabled: Style,
    pub button_disabled: Style,
    pub error: Style,
    pub muted: Style,
}

impl Theme {
    fn terminal_default() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::DarkGray),
            focused: Style::default().fg(Color::White).bg(Color::DarkGray),
            placeholder: Style::default().fg(Color::DarkGray),
            value: Style::default().fg(Color::Cyan),
            button_enabled: Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            muted: Style::default().fg(Color::DarkGray),
        }
    }
}

static THEME: OnceCell<Theme> = OnceCell::new();

/// Installs the styles once at startup. Later calls are no-ops.
pub fn init() {
    THEME.get_or_init(Theme::terminal_default);
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::terminal_default)
}
