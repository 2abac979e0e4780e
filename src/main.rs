use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use nonpb_terminal::config::Config;
use nonpb_terminal::hierarchy::{Category, category_label};
use nonpb_terminal::image_fetch::HttpImageSource;
use nonpb_terminal::image_view::halfblock_lines;
use nonpb_terminal::selection::{Level, level_label, placeholder};
use nonpb_terminal::state::{AppState, Focus};
use nonpb_terminal::theme::{self, theme};

struct App {
    state: AppState,
    images: HttpImageSource,
    should_quit: bool,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            state: AppState::new(config.data_dir.clone()),
            images: HttpImageSource::new(config)?,
            should_quit: false,
        })
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                _ => self.state.help_overlay = false,
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.state.focus_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.state.cycle_focused(true),
            KeyCode::Char('k') | KeyCode::Up => self.state.cycle_focused(false),
            KeyCode::Char('c') => self.state.toggle_category(),
            KeyCode::Char('r') => self.state.reset_selection(),
            KeyCode::Char('d') => self.display_profile(),
            KeyCode::Enter => {
                if self.state.focus == Focus::Category {
                    self.state.toggle_category();
                } else {
                    self.display_profile();
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }

    fn display_profile(&mut self) {
        self.state.display_profile(&self.images);
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    theme::init();
    let mut app = App::new(&config)?;

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("create terminal")?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_lines())
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_controls(frame, chunks[1], state);
    render_profile(frame, chunks[2], state);

    let status = Paragraph::new(status_line(state));
    frame.render_widget(status, chunks[3]);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[4]);

    let footer = Paragraph::new(footer_text())
        .style(theme().muted)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[5]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_lines() -> Vec<Line<'static>> {
    vec![
        Line::styled("non-pb identifier (beta)", theme().title),
        Line::styled("quoted from bouno05 (https://bo-no05.hatenadiary.org/)", theme().subtitle),
    ]
}

fn footer_text() -> &'static str {
    "Tab/←/→ Focus | j/k/↑/↓ Change | c Category | Enter/d Display | r Reset | ? Help | q Quit"
}

fn render_controls(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Selection").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![category_line(state)];
    if let Some(err) = &state.load_error {
        // No hierarchy, so the dropdowns have nothing to offer this cycle.
        lines.push(Line::styled(err.clone(), theme().error));
    } else {
        for level in Level::ALL {
            lines.push(dropdown_line(state, level));
        }
        lines.push(button_line(state));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn category_line(state: &AppState) -> Line<'static> {
    let focused = state.focus == Focus::Category;
    let mut spans = vec![Span::raw(row_prefix(focused)), Span::raw(format!("{:<8}", "Data"))];
    for category in Category::ALL {
        let mark = if category == state.category { "(•)" } else { "( )" };
        let style = if category == state.category {
            theme().value
        } else {
            theme().placeholder
        };
        spans.push(Span::styled(
            format!("{mark} {}  ", category_label(category)),
            style,
        ));
    }
    focus_line(spans, focused)
}

fn dropdown_line(state: &AppState, level: Level) -> Line<'static> {
    let focused = state.focus.level() == Some(level);
    let choices = state.level_choices(level);
    let (text, style) = match state.selection.get(level) {
        Some(value) => (value.to_string(), theme().value),
        None => (placeholder(level).to_string(), theme().placeholder),
    };
    let count = if choices.is_empty() {
        String::new()
    } else {
        format!("  [{}]", choices.len())
    };
    let spans = vec![
        Span::raw(row_prefix(focused)),
        Span::raw(format!("{:<8}", level_label(level))),
        Span::styled(format!("▾ {text}"), style),
        Span::styled(count, theme().muted),
    ];
    focus_line(spans, focused)
}

fn button_line(state: &AppState) -> Line<'static> {
    let focused = state.focus == Focus::Display;
    let style = if state.can_display() {
        theme().button_enabled
    } else {
        theme().button_disabled
    };
    let spans = vec![
        Span::raw(row_prefix(focused)),
        Span::styled(" Display Profile ", style),
    ];
    focus_line(spans, focused)
}

fn row_prefix(focused: bool) -> &'static str {
    if focused { "> " } else { "  " }
}

fn focus_line(spans: Vec<Span<'static>>, focused: bool) -> Line<'static> {
    let line = Line::from(spans);
    if focused {
        line.patch_style(theme().focused)
    } else {
        line
    }
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match &state.profile_label {
        Some(label) => format!("Player Profile: {label}"),
        None => "Player Profile".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    if state.images.is_empty() {
        let hint = if state.can_display() {
            "Press Enter to display the profile"
        } else {
            "Select year, league, team and player"
        };
        frame.render_widget(Paragraph::new(hint).style(theme().muted), inner);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    for (image, col) in state.images.iter().zip(cols.iter()) {
        let lines = halfblock_lines(image, col.width, col.height);
        frame.render_widget(Paragraph::new(lines), *col);
    }
}

fn status_line(state: &AppState) -> Line<'static> {
    if let Some(err) = state.fetch_error.as_ref().or(state.load_error.as_ref()) {
        return Line::styled(err.clone(), theme().error);
    }
    let selected = Level::ALL
        .iter()
        .filter(|level| state.selection.get(**level).is_some())
        .count();
    Line::styled(
        format!(
            "{} | {selected}/{} selected",
            category_label(state.category),
            Level::ALL.len()
        ),
        theme().muted,
    )
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "non-pb identifier - Help",
        "",
        "  Tab / → / l      Next control",
        "  S-Tab / ← / h    Previous control",
        "  j/k or ↓/↑       Change the focused value",
        "  c                Toggle Pitch / Bat",
        "  Enter / d        Display profile images",
        "  r                Reset selection",
        "  ?                Toggle help",
        "  q                Quit",
        "",
        "Changing a level clears the levels below it.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
