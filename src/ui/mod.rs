//! UI rendering for the slide show
//!
//! Every frame has the same frame layout:
//! - Header with the user, the slide title and progress dots
//! - Body with the current slide, centered
//! - Status line with the last action's outcome
//! - Footer with key hints for the current slide

mod helpers;
mod layout;
mod slides;
mod theme;

pub use layout::{breakpoints, LayoutContext};
pub use slides::slide_lines;
pub use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_SUCCESS};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, StatusKind};
use helpers::{centered_rect, inner_rect};
use theme::{COLOR_HEADER, COLOR_SELECTED};

/// Widest the slide body gets, in columns.
const BODY_WIDTH: u16 = 76;

/// `●` for the current slide, `○` for the rest.
pub fn progress_dots(current: usize, total: usize) -> String {
    (0..total)
        .map(|i| if i == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn key_hints(app: &App, ctx: LayoutContext) -> Line<'static> {
    let hints: &[(&str, &str)] = if app.on_actions() {
        if ctx.is_narrow() {
            &[("↑↓", "select"), ("enter", "run"), ("q", "quit")]
        } else {
            &[
                ("↑↓", "select"),
                ("enter", "run"),
                ("p/v", "export"),
                ("s", "share"),
                ("c", "copy"),
                ("←", "back"),
                ("q", "quit"),
            ]
        }
    } else if ctx.is_narrow() {
        &[("←→", "move"), ("q", "quit")]
    } else {
        &[("←→/space", "move"), ("home/end", "jump"), ("q", "quit")]
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            format!("@{} · {} wrapped", app.stats.login, app.stats.year),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.current_slide().title()),
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let dots = Line::from(Span::styled(
        progress_dots(app.current, app.slide_count()),
        Style::default().fg(COLOR_SELECTED),
    ));
    frame.render_widget(Paragraph::new(dots).alignment(Alignment::Right), area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, ctx: LayoutContext) {
    let lines = slide_lines(app, ctx);
    let height = (lines.len() as u16).min(area.height);
    let width = lines
        .iter()
        .map(|line| line.width() as u16)
        .max()
        .unwrap_or(0)
        .clamp(1, BODY_WIDTH);
    let body = centered_rect(area, width, height);
    frame.render_widget(Paragraph::new(lines), body);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Info => COLOR_DIM,
        StatusKind::Success => COLOR_SUCCESS,
        StatusKind::Error => COLOR_ERROR,
    };
    let line = Line::from(Span::styled(status.text.clone(), Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let ctx = LayoutContext::new(area.width, area.height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Slide
            Constraint::Length(1), // Status
            Constraint::Length(1), // Key hints
        ])
        .split(inner);

    render_header(frame, chunks[0], app);
    render_body(frame, chunks[2], app, ctx);
    render_status(frame, chunks[3], app);
    frame.render_widget(
        Paragraph::new(key_hints(app, ctx)).alignment(Alignment::Center),
        chunks[4],
    );
}
