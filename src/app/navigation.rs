//! Navigation methods for the App.

use super::{ActionItem, App};

impl App {
    /// Advance one slide, stopping at the last.
    pub fn next_slide(&mut self) {
        if self.current + 1 < self.slides.len() {
            self.current += 1;
            self.status = None;
        }
    }

    /// Go back one slide, stopping at the first.
    pub fn prev_slide(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.status = None;
        }
    }

    pub fn first_slide(&mut self) {
        self.current = 0;
        self.status = None;
    }

    pub fn last_slide(&mut self) {
        self.current = self.slides.len().saturating_sub(1);
        self.status = None;
    }

    /// Move the action selection up
    pub fn select_prev_action(&mut self) {
        self.action_index = self.action_index.saturating_sub(1);
    }

    /// Move the action selection down
    pub fn select_next_action(&mut self) {
        if self.action_index + 1 < ActionItem::ALL.len() {
            self.action_index += 1;
        }
    }

    /// Mark the app to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
