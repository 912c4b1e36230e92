//! Side effects behind the actions slide.
//!
//! [`App::perform`] runs an [`AppCommand`] through an [`ActionRunner`] and
//! turns the outcome into a status message. Failures never leave this
//! module as errors.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{App, AppCommand, StatusMessage};
use crate::error::WrappedError;
use crate::export::{self, ExportFormat};
use crate::share;
use crate::stats::WrappedStats;

/// The effects a key press can trigger.
pub trait ActionRunner {
    fn export(
        &mut self,
        stats: &WrappedStats,
        format: ExportFormat,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, WrappedError>;

    fn share(&mut self, stats: &WrappedStats) -> Result<(), WrappedError>;

    fn copy_summary(&mut self, stats: &WrappedStats) -> Result<(), WrappedError>;
}

/// Real filesystem, browser and clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemActions;

impl ActionRunner for SystemActions {
    fn export(
        &mut self,
        stats: &WrappedStats,
        format: ExportFormat,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, WrappedError> {
        Ok(export::export_card(stats, format, dir)?)
    }

    fn share(&mut self, stats: &WrappedStats) -> Result<(), WrappedError> {
        share::open_share(stats)?;
        Ok(())
    }

    fn copy_summary(&mut self, stats: &WrappedStats) -> Result<(), WrappedError> {
        Ok(share::copy_summary(stats)?)
    }
}

fn describe_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl App {
    /// Perform `command` and record the outcome in the status line.
    pub fn perform<R: ActionRunner>(&mut self, command: AppCommand, runner: &mut R) {
        let status = match command {
            AppCommand::None | AppCommand::Quit => return,
            AppCommand::Export(format) => {
                match runner.export(&self.stats, format, &self.export_dir) {
                    Ok(paths) => {
                        info!(%format, count = paths.len(), "card exported");
                        StatusMessage::success(format!("Saved {}", describe_paths(&paths)))
                    }
                    Err(err) => {
                        warn!(code = err.error_code(), "export failed: {}", err);
                        StatusMessage::error(err.user_message())
                    }
                }
            }
            AppCommand::Share => match runner.share(&self.stats) {
                Ok(()) => StatusMessage::success("Opened the share page in your browser"),
                Err(err) => {
                    warn!(code = err.error_code(), "share failed: {}", err);
                    StatusMessage::error(err.user_message())
                }
            },
            AppCommand::CopySummary => match runner.copy_summary(&self.stats) {
                Ok(()) => StatusMessage::success("Summary copied to clipboard"),
                Err(err) => {
                    warn!(code = err.error_code(), "copy failed: {}", err);
                    StatusMessage::error(err.user_message())
                }
            },
        };
        self.set_status(status);
    }
}
