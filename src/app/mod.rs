//! Application state for the slide show.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Slide`] - Which slide is currently displayed
//! - [`ActionItem`] - Entries on the final slide
//! - [`AppCommand`] - Side effects returned by [`App::handle_key`]
//!
//! Key handling only mutates `App`. The runtime loop performs the returned
//! command through an [`ActionRunner`] and writes the outcome back as a
//! status message.

mod actions;
mod handlers;
mod navigation;
mod types;

pub use actions::{ActionRunner, SystemActions};
pub use types::{ActionItem, AppCommand, Slide, StatusKind, StatusMessage};

use std::path::PathBuf;

use crate::stats::WrappedStats;

/// Slides worth showing for these stats. Languages and TopRepos are
/// dropped when they would be empty; Actions is always last.
pub fn slides_for(stats: &WrappedStats) -> Vec<Slide> {
    Slide::ALL
        .into_iter()
        .filter(|slide| match slide {
            Slide::Languages => !stats.languages.is_empty(),
            Slide::TopRepos => !stats.top_repos.is_empty(),
            _ => true,
        })
        .collect()
}

/// Main application state
pub struct App {
    pub stats: WrappedStats,
    pub slides: Vec<Slide>,
    /// Index into `slides`
    pub current: usize,
    /// Index into [`ActionItem::ALL`]
    pub action_index: usize,
    pub status: Option<StatusMessage>,
    /// Where exported cards are written
    pub export_dir: PathBuf,
    pub should_quit: bool,
    /// Redraw on the next loop iteration
    pub needs_redraw: bool,
}

impl App {
    pub fn new(stats: WrappedStats, export_dir: PathBuf) -> Self {
        let slides = slides_for(&stats);
        Self {
            stats,
            slides,
            current: 0,
            action_index: 0,
            status: None,
            export_dir,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn current_slide(&self) -> Slide {
        self.slides
            .get(self.current)
            .copied()
            .unwrap_or(Slide::Actions)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn on_actions(&self) -> bool {
        self.current_slide() == Slide::Actions
    }

    pub fn selected_action(&self) -> ActionItem {
        ActionItem::ALL[self.action_index.min(ActionItem::ALL.len() - 1)]
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }
}
