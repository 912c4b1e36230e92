//! Type definitions for the application state.
//!
//! - [`Slide`] - One page of the wrap
//! - [`ActionItem`] - Entries on the final slide
//! - [`AppCommand`] - Side effect requested by a key press
//! - [`StatusMessage`] - Feedback line under the slide

use crate::export::ExportFormat;

/// Slides in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Intro,
    Contributions,
    Streaks,
    Languages,
    Rhythm,
    TopRepos,
    Archetype,
    Achievements,
    Insights,
    Actions,
}

impl Slide {
    pub const ALL: [Slide; 10] = [
        Slide::Intro,
        Slide::Contributions,
        Slide::Streaks,
        Slide::Languages,
        Slide::Rhythm,
        Slide::TopRepos,
        Slide::Archetype,
        Slide::Achievements,
        Slide::Insights,
        Slide::Actions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Slide::Intro => "Intro",
            Slide::Contributions => "Contributions",
            Slide::Streaks => "Streaks",
            Slide::Languages => "Languages",
            Slide::Rhythm => "Rhythm",
            Slide::TopRepos => "Top Repositories",
            Slide::Archetype => "Archetype",
            Slide::Achievements => "Achievements",
            Slide::Insights => "Insights",
            Slide::Actions => "Share Your Year",
        }
    }
}

/// Entries on the [`Slide::Actions`] slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionItem {
    ExportPng,
    ExportSvg,
    Share,
    CopySummary,
    Quit,
}

impl ActionItem {
    pub const ALL: [ActionItem; 5] = [
        ActionItem::ExportPng,
        ActionItem::ExportSvg,
        ActionItem::Share,
        ActionItem::CopySummary,
        ActionItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionItem::ExportPng => "Export PNG",
            ActionItem::ExportSvg => "Export SVG",
            ActionItem::Share => "Share",
            ActionItem::CopySummary => "Copy summary",
            ActionItem::Quit => "Quit",
        }
    }

    /// Single-key shortcut on the actions slide.
    pub fn shortcut(&self) -> char {
        match self {
            ActionItem::ExportPng => 'p',
            ActionItem::ExportSvg => 'v',
            ActionItem::Share => 's',
            ActionItem::CopySummary => 'c',
            ActionItem::Quit => 'q',
        }
    }

    pub fn command(&self) -> AppCommand {
        match self {
            ActionItem::ExportPng => AppCommand::Export(ExportFormat::Png),
            ActionItem::ExportSvg => AppCommand::Export(ExportFormat::Svg),
            ActionItem::Share => AppCommand::Share,
            ActionItem::CopySummary => AppCommand::CopySummary,
            ActionItem::Quit => AppCommand::Quit,
        }
    }
}

/// What the runtime loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// State changed (or not); just redraw.
    None,
    Export(ExportFormat),
    Share,
    CopySummary,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }
}
