//! Card export to disk.

mod common;

use ghwrapped::export::{card, export_card, ExportError, ExportFormat};
use tempfile::TempDir;

use common::{empty_stats, sample_stats};

#[test]
fn test_export_all_writes_both_files() {
    let dir = TempDir::new().unwrap();
    let stats = sample_stats();

    let paths = export_card(&stats, ExportFormat::All, dir.path()).unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0], dir.path().join("octocat-wrapped-2024.png"));
    assert_eq!(paths[1], dir.path().join("octocat-wrapped-2024.svg"));
    assert!(paths.iter().all(|p| p.exists()));
}

#[test]
fn test_png_decodes_at_card_size() {
    let dir = TempDir::new().unwrap();
    let paths = export_card(&sample_stats(), ExportFormat::Png, dir.path()).unwrap();

    let image = image::open(&paths[0]).expect("PNG should decode");
    assert_eq!(image.width(), card::WIDTH);
    assert_eq!(image.height(), card::HEIGHT);
}

#[test]
fn test_svg_is_well_formed_enough() {
    let dir = TempDir::new().unwrap();
    let paths = export_card(&sample_stats(), ExportFormat::Svg, dir.path()).unwrap();

    let svg = std::fs::read_to_string(&paths[0]).unwrap();
    assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
    assert!(svg.contains(r#"width="1200""#));
    assert!(svg.contains(r#"height="630""#));
    assert!(svg.contains("@octocat"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<text").count(), svg.matches("</text>").count());
}

#[test]
fn test_export_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("cards").join("2024");

    let paths = export_card(&empty_stats(), ExportFormat::Svg, &target).unwrap();
    assert_eq!(paths, vec![target.join("ghost-wrapped-2024.svg")]);
    assert!(paths[0].exists());
}

#[test]
fn test_export_into_a_file_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let err = export_card(&sample_stats(), ExportFormat::Png, &blocker).unwrap_err();
    assert!(matches!(err, ExportError::Write { .. }), "{:?}", err);
}

#[test]
fn test_export_overwrites_previous_card() {
    let dir = TempDir::new().unwrap();
    let stats = sample_stats();
    let first = export_card(&stats, ExportFormat::Svg, dir.path()).unwrap();
    let second = export_card(&stats, ExportFormat::Svg, dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
