//! Share-card export.
//!
//! Both formats draw the same [`card::layout`]. Files are named
//! `{login}-wrapped-{year}.{ext}` inside the export directory, which is
//! created when missing.

pub mod card;
pub mod glyphs;
pub mod png;
pub mod svg;

pub use png::render_png;
pub use svg::render_svg;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::stats::WrappedStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    /// PNG and SVG
    All,
}

impl ExportFormat {
    fn extensions(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Png => &["png"],
            ExportFormat::Svg => &["svg"],
            ExportFormat::All => &["png", "svg"],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => write!(f, "PNG"),
            ExportFormat::Svg => write!(f, "SVG"),
            ExportFormat::All => write!(f, "PNG + SVG"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("could not encode {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
}

/// `{login}-wrapped-{year}.{ext}`
pub fn card_file_name(stats: &WrappedStats, ext: &str) -> String {
    format!("{}-wrapped-{}.{}", stats.login, stats.year, ext)
}

fn write_one(stats: &WrappedStats, dir: &Path, ext: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(card_file_name(stats, ext));
    match ext {
        "png" => render_png(stats)
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|err| match err {
                image::ImageError::IoError(io) => ExportError::Write {
                    path: path.clone(),
                    message: io.to_string(),
                },
                other => ExportError::Encode {
                    path: path.clone(),
                    message: other.to_string(),
                },
            })?,
        _ => fs::write(&path, render_svg(stats)).map_err(|err| ExportError::Write {
            path: path.clone(),
            message: err.to_string(),
        })?,
    }
    tracing::info!(path = %path.display(), "exported card");
    Ok(path)
}

/// Write the card(s) for `format` into `dir`; returns the written paths.
pub fn export_card(
    stats: &WrappedStats,
    format: ExportFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|err| ExportError::Write {
        path: dir.to_path_buf(),
        message: err.to_string(),
    })?;
    format
        .extensions()
        .iter()
        .map(|ext| write_one(stats, dir, ext))
        .collect()
}
