//! Line-based output for everything that happens outside the TUI: progress
//! while fetching, errors, and the `--summary` report.

mod boxes;
mod summary;

pub use boxes::*;
pub use summary::{print_summary, summary_report};
