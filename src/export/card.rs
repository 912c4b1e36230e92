//! Fixed 1200×630 card layout.
//!
//! [`layout`] turns the statistics into a flat list of rectangles and text
//! runs; the SVG and PNG writers only know how to draw those.

use chrono::{Datelike, NaiveDate};

use crate::stats::WrappedStats;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const MARGIN: i32 = 60;
const CELL: i32 = 16;
const CELL_GAP: i32 = 4;
const HEATMAP_TOP: i32 = 440;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(13, 17, 23);
    pub const PANEL: Rgb = Rgb(22, 27, 34);
    pub const TEXT: Rgb = Rgb(230, 237, 243);
    pub const MUTED: Rgb = Rgb(139, 148, 158);
    pub const ACCENT: Rgb = Rgb(63, 185, 80);

    /// Heatmap levels 0..=4.
    pub const HEAT: [Rgb; 5] = [
        Rgb(33, 38, 45),
        Rgb(14, 68, 41),
        Rgb(0, 109, 50),
        Rgb(38, 166, 65),
        Rgb(57, 211, 83),
    ];

    pub const LANGUAGES: [Rgb; 6] = [
        Rgb(222, 165, 132),
        Rgb(53, 114, 165),
        Rgb(241, 224, 90),
        Rgb(0, 173, 216),
        Rgb(176, 114, 25),
        Rgb(137, 224, 81),
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        fill: Rgb,
        radius: u32,
    },
    /// `y` is the top of the text box; `size` its height in pixels.
    Text {
        x: i32,
        y: i32,
        size: u32,
        text: String,
        fill: Rgb,
        bold: bool,
    },
}

fn rect(x: i32, y: i32, w: u32, h: u32, fill: Rgb, radius: u32) -> Shape {
    Shape::Rect {
        x,
        y,
        w,
        h,
        fill,
        radius,
    }
}

fn text(x: i32, y: i32, size: u32, value: impl Into<String>, fill: Rgb, bold: bool) -> Shape {
    Shape::Text {
        x,
        y,
        size,
        text: value.into(),
        fill,
        bold,
    }
}

/// Cut `value` to `max` characters, marking the cut with `..`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(2)).collect();
    format!("{}..", kept)
}

/// Heat level 0..=4 relative to the busiest day.
pub fn heat_level(count: u32, max: u32) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let level = (count as u64 * 4).div_ceil(max as u64) as usize;
    level.clamp(1, 4)
}

/// Column (week) and row (weekday, Monday first) of `date` in a grid that
/// starts on the week containing `start`.
pub fn grid_position(date: NaiveDate, start: NaiveDate) -> (i32, i32) {
    let offset = start.weekday().num_days_from_monday() as i64;
    let index = (date - start).num_days() + offset;
    ((index / 7) as i32, (index % 7) as i32)
}

fn metric_panel(shapes: &mut Vec<Shape>, x: i32, value: String, label: &str) {
    shapes.push(rect(x, 150, 255, 110, palette::PANEL, 12));
    shapes.push(text(x + 20, 172, 35, value, palette::TEXT, true));
    shapes.push(text(x + 20, 226, 14, label, palette::MUTED, false));
}

/// All shapes of the card, back to front.
pub fn layout(stats: &WrappedStats) -> Vec<Shape> {
    let mut shapes = vec![rect(0, 0, WIDTH, HEIGHT, palette::BACKGROUND, 0)];

    // Header
    shapes.push(text(
        MARGIN,
        50,
        35,
        truncate(&format!("@{}", stats.login), 22),
        palette::ACCENT,
        true,
    ));
    shapes.push(text(
        MARGIN,
        100,
        21,
        format!("{} GITHUB WRAPPED", stats.year),
        palette::TEXT,
        true,
    ));
    if stats.display_name != stats.login {
        shapes.push(text(
            760,
            64,
            14,
            truncate(&stats.display_name, 30),
            palette::MUTED,
            false,
        ));
    }

    // Headline numbers
    let metrics = [
        (stats.total_contributions.to_string(), "CONTRIBUTIONS"),
        (
            format!("{}D", stats.streaks.longest.length),
            "LONGEST STREAK",
        ),
        (stats.active_days.to_string(), "ACTIVE DAYS"),
        (stats.pull_requests.to_string(), "PULL REQUESTS"),
    ];
    for (i, (value, label)) in metrics.into_iter().enumerate() {
        metric_panel(&mut shapes, MARGIN + i as i32 * 275, value, label);
    }

    // Archetype
    shapes.push(rect(MARGIN, 280, 530, 120, palette::PANEL, 12));
    shapes.push(text(MARGIN + 20, 300, 14, "ARCHETYPE", palette::MUTED, false));
    shapes.push(text(
        MARGIN + 20,
        328,
        28,
        truncate(stats.archetype.title(), 20),
        palette::ACCENT,
        true,
    ));
    shapes.push(text(
        MARGIN + 20,
        372,
        14,
        format!("{} ACHIEVEMENTS UNLOCKED", stats.unlocked_count()),
        palette::TEXT,
        false,
    ));

    // Languages
    let lang_x = 610;
    shapes.push(rect(lang_x, 280, 530, 120, palette::PANEL, 12));
    shapes.push(text(lang_x + 20, 300, 14, "TOP LANGUAGES", palette::MUTED, false));
    let bar_width = 490u32;
    if stats.languages.is_empty() {
        shapes.push(rect(lang_x + 20, 328, bar_width, 20, palette::HEAT[0], 4));
        shapes.push(text(lang_x + 20, 364, 14, "NO LANGUAGE DATA", palette::MUTED, false));
    } else {
        let total: f64 = stats.languages.iter().map(|l| l.percent).sum();
        let mut x = lang_x + 20;
        for (i, language) in stats.languages.iter().enumerate() {
            let color = palette::LANGUAGES[i % palette::LANGUAGES.len()];
            let w = ((language.percent / total) * bar_width as f64).round() as u32;
            let w = if i + 1 == stats.languages.len() {
                (lang_x + 20 + bar_width as i32 - x).max(0) as u32
            } else {
                w
            };
            shapes.push(rect(x, 328, w, 20, color, 0));
            x += w as i32;
        }
        let legend: Vec<String> = stats
            .languages
            .iter()
            .take(3)
            .map(|l| format!("{} {:.0}%", truncate(&l.name, 7), l.percent))
            .collect();
        shapes.push(text(
            lang_x + 20,
            364,
            14,
            legend.join("  "),
            palette::TEXT,
            false,
        ));
    }

    // Contribution heatmap
    shapes.push(text(MARGIN, 418, 14, "CONTRIBUTIONS", palette::MUTED, false));
    let max = stats.calendar.iter().map(|d| d.count).max().unwrap_or(0);
    let start = stats.window.from;
    for day in &stats.calendar {
        let (col, row) = grid_position(day.date, start);
        shapes.push(rect(
            MARGIN + col * (CELL + CELL_GAP),
            HEATMAP_TOP + row * (CELL + CELL_GAP),
            CELL as u32,
            CELL as u32,
            palette::HEAT[heat_level(day.count, max)],
            3,
        ));
    }

    // Footer
    shapes.push(text(
        MARGIN,
        594,
        14,
        format!(
            "CURRENT STREAK {}D  |  PEAK HOUR {}  |  GHWRAPPED",
            stats.streaks.current,
            stats
                .peak_hour
                .map_or_else(|| "-".to_string(), |h| format!("{:02}:00", h))
        ),
        palette::MUTED,
        false,
    ));

    shapes
}
