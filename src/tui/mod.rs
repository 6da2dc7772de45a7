//! Ratatui-based terminal UI.
//!
//! A radio-style window selector (7/30/90/180/365 days) drives a scatter chart
//! of the trailing window plus its text summary. The weight history is fetched
//! once when the TUI starts; changing the window only re-derives the view.

use std::io;
use std::time::Duration;

use chrono::Days;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::session::{Session, View};
use crate::config::Settings;
use crate::domain::{Selection, WindowSize};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{WeightChart, day_from_number, day_number};

/// Start the TUI.
///
/// The session is opened before the terminal switches to the alternate screen
/// so a fetch or parse failure is printed normally.
pub fn run(settings: Settings, window: WindowSize) -> Result<(), AppError> {
    let session = Session::open(settings)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session, window);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: Session,
    window: WindowSize,
    /// The current view, or the error that deriving it produced.
    view: Result<View, String>,
    status: String,
}

impl App {
    fn new(session: Session, window: WindowSize) -> Self {
        let mut app = Self {
            session,
            window,
            view: Err(String::new()),
            status: String::new(),
        };
        app.refresh_view();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let next = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Char('h') => self.window.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.window.next(),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                WindowSize::ALL[idx]
            }
            _ => return false,
        };

        if next != self.window {
            self.window = next;
            self.refresh_view();
        }
        false
    }

    fn refresh_view(&mut self) {
        self.view = self
            .session
            .view(Selection::Days(self.window))
            .map_err(|e| e.to_string());
        self.status = match &self.view {
            Ok(view) => format!("{} days: {} points", self.window.days(), view.series.len()),
            Err(err) => format!("error: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_selector(frame, chunks[2]);
        self.draw_summary(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let settings = self.session.settings();
        let source = if settings.fetch_mode.uses_cache() {
            format!("cache: {}", settings.cache_path.display())
        } else {
            "sandboxed source".to_string()
        };
        let line = Line::from(vec![
            Span::styled("wlt", Style::default().fg(Color::Cyan)),
            Span::raw(" weight log | "),
            Span::styled(
                format!("{} observations | {source}", self.session.history().len()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("Weight over the last {} days", self.window.days());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let view = match &self.view {
            Ok(view) => view,
            Err(err) => {
                let msg = Paragraph::new(format!("Cannot show this window: {err}"))
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .wrap(Wrap { trim: true });
                frame.render_widget(msg, inner);
                return;
            }
        };

        let (points, x_bounds, y_bounds) = chart_series(view, self.window);
        let x_ticks = chart_ticks(view, x_bounds);

        let widget = WeightChart {
            points: &points,
            x_bounds,
            y_bounds,
            x_label: "Date",
            y_label: "Weight (lbs)",
            date_format: view.ticks.format,
            x_ticks: &x_ticks,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_selector(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![Span::raw("Number of days: ")];
        for window in WindowSize::ALL {
            let selected = window == self.window;
            let marker = if selected { "(•)" } else { "( )" };
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("{marker} {}", window.days()), style));
            spans.push(Span::raw("  "));
        }
        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_summary(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (text, style) = match &self.view {
            Ok(view) => (view.series.summary(), Style::default()),
            Err(err) => (format!("error: {err}"), Style::default().fg(Color::Red)),
        };
        let p = Paragraph::new(Text::from(text))
            .style(style)
            .block(Block::default().borders(Borders::LEFT | Borders::RIGHT));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ window  1-5 pick  q quit";
        let status_style = if self.view.is_ok() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Red)
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, status_style),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build the scatter series and axis bounds for Plotters.
///
/// The x range covers the whole nominal window ending at the last weigh-in,
/// so sparse windows are not stretched to fill the chart.
fn chart_series(view: &View, window: WindowSize) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let points: Vec<(f64, f64)> = view
        .series
        .observations()
        .iter()
        .map(|o| (day_number(o.date), o.weight))
        .collect();

    let x_bounds = match view.series.last_date() {
        Some(last) => {
            let start = last.checked_sub_days(Days::new(window.days())).unwrap_or(last);
            let (x0, x1) = (day_number(start), day_number(last));
            if x1 > x0 { [x0, x1] } else { [x1 - 1.0, x1] }
        }
        None => [0.0, 1.0],
    };

    let y_bounds = match view.series.weight_bounds() {
        Some((lo, hi)) => {
            let pad = ((hi - lo).abs() * 0.05).max(0.5);
            [lo - pad, hi + pad]
        }
        None => [0.0, 1.0],
    };

    (points, x_bounds, y_bounds)
}

/// Tick positions inside `x_bounds`, placed on the dates the view's tick
/// policy selects.
fn chart_ticks(view: &View, x_bounds: [f64; 2]) -> Vec<f64> {
    match (day_from_number(x_bounds[0].ceil()), day_from_number(x_bounds[1].floor())) {
        (Some(start), Some(end)) => view.ticks.ticks(start, end).into_iter().map(day_number).collect(),
        _ => Vec::new(),
    }
}
