//! Color theme constants for the slides.
//!
//! GitHub's dark palette, so the TUI matches the exported card.

use ratatui::style::Color;

/// Frame and separators
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Headline numbers and titles
pub const COLOR_ACCENT: Color = Color::Rgb(63, 185, 80);

pub const COLOR_HEADER: Color = Color::White;

/// Labels and hints
pub const COLOR_DIM: Color = Color::Gray;

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

pub const COLOR_ERROR: Color = Color::Red;

/// Selected action
pub const COLOR_SELECTED: Color = Color::Rgb(88, 166, 255);

/// Heatmap levels 0..=4, same steps as the card.
pub const HEAT_COLORS: [Color; 5] = [
    Color::Rgb(33, 38, 45),
    Color::Rgb(14, 68, 41),
    Color::Rgb(0, 109, 50),
    Color::Rgb(38, 166, 65),
    Color::Rgb(57, 211, 83),
];

/// Language bar segments, cycled.
pub const LANGUAGE_COLORS: [Color; 6] = [
    Color::Rgb(222, 165, 132),
    Color::Rgb(53, 114, 165),
    Color::Rgb(241, 224, 90),
    Color::Rgb(0, 173, 216),
    Color::Rgb(176, 114, 25),
    Color::Rgb(137, 224, 81),
];
