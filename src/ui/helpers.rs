//! Helper functions for UI rendering
//!
//! Number formatting, truncation, bars and the contribution heatmap.

use chrono::Datelike;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{COLOR_DIM, HEAT_COLORS};
use crate::export::card::{grid_position, heat_level};
use crate::models::ContributionDay;
use crate::stats::insights::month_name;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const HEAT_CELL: &str = "■";

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

/// `width`×`height` rect centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Thousands separators: 12345 -> "12,345"
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate to `max_width` display columns, adding "..." if truncated.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut kept = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        kept.push(c);
    }
    format!("{}...", kept)
}

/// Horizontal bar of `width` cells, filled in proportion to value/max.
pub fn bar(value: f64, max: f64, width: u16) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round().clamp(0.0, width as f64) as usize
    } else {
        0
    };
    let filled = if value > 0.0 { filled.max(1) } else { filled };
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(width as usize - filled.min(width as usize))
    )
}

/// One block character per value, scaled to the largest.
pub fn sparkline(values: &[u32]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&v| {
            if v == 0 || max == 0 {
                ' '
            } else {
                let idx = (v as u64 * 8).div_ceil(max as u64) as usize - 1;
                SPARK_LEVELS[idx.min(7)]
            }
        })
        .collect()
}

fn heat_span(count: u32, max: u32) -> Span<'static> {
    Span::styled(
        HEAT_CELL,
        Style::default().fg(HEAT_COLORS[heat_level(count, max)]),
    )
}

/// GitHub-style grid: one row per weekday, one column per week.
pub fn heatmap_by_week(calendar: &[ContributionDay]) -> Vec<Line<'static>> {
    let Some(first) = calendar.first() else {
        return Vec::new();
    };
    let max = calendar.iter().map(|d| d.count).max().unwrap_or(0);
    let weeks = calendar
        .last()
        .map_or(0, |last| grid_position(last.date, first.date).0 as usize + 1);

    let mut grid = vec![vec![None; weeks]; 7];
    for day in calendar {
        let (col, row) = grid_position(day.date, first.date);
        grid[row as usize][col as usize] = Some(day.count);
    }

    grid.into_iter()
        .enumerate()
        .map(|(row, cells)| {
            let mut spans = vec![Span::styled(
                format!("{} ", WEEKDAY_LABELS[row]),
                Style::default().fg(COLOR_DIM),
            )];
            spans.extend(cells.into_iter().map(|cell| match cell {
                Some(count) => heat_span(count, max),
                None => Span::raw(" "),
            }));
            Line::from(spans)
        })
        .collect()
}

/// Compact grid for narrow terminals: one row per month, one cell per day.
pub fn heatmap_by_month(calendar: &[ContributionDay]) -> Vec<Line<'static>> {
    let max = calendar.iter().map(|d| d.count).max().unwrap_or(0);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_month = 0;
    for day in calendar {
        if day.date.month() != current_month {
            current_month = day.date.month();
            lines.push(Line::from(Span::styled(
                format!("{} ", month_name(current_month).chars().take(3).collect::<String>()),
                Style::default().fg(COLOR_DIM),
            )));
        }
        if let Some(line) = lines.last_mut() {
            line.spans.push(heat_span(day.count, max));
        }
    }
    lines
}
