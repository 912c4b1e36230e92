//! File logging.
//!
//! The TUI owns stdout, so tracing output goes to
//! `~/.ghwrapped/logs/ghwrapped.log` instead of the terminal.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::app_dir;

pub const LOG_FILE: &str = "ghwrapped.log";

pub fn log_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join("logs").join(LOG_FILE))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Returns the log path, or `None` when the
/// file could not be opened, in which case nothing is logged.
pub fn init_logging(filter: &str) -> Option<PathBuf> {
    let path = log_path()?;
    let file = open_log(&path).ok()?;
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    tracing::info!(
        "ghwrapped {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        path.display()
    );
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join(LOG_FILE);
        open_log(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_log_path_ends_with_file_name() {
        if let Some(path) = log_path() {
            assert!(path.ends_with(Path::new("logs").join(LOG_FILE)));
        }
    }
}
