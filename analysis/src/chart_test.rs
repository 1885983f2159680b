use crate::chart::{locate_font, panels, render, ChartError, ChartOptions, ChartPanel};
use benchcmp_ingest::{extract, MetricSet};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn options(directory: &Path) -> ChartOptions {
    ChartOptions {
        path: directory.join("performance_comparison.png"),
        dpi: 300,
        font: None,
    }
}

#[test]
pub fn figure_is_fifteen_by_twelve_inches() {
    let options = options(Path::new("."));

    assert_eq!(options.pixel_size(), (4500, 3600));
    assert_eq!(options.points(72.0), 300.0);
}

#[test]
pub fn panels_follow_metrics() {
    let metrics = extract(
        "CausalDB INSERT: 0.0100 seconds, 1.00 MB memory\n\
         SQLite INSERT: 0.0500 seconds, 4.00 MB memory\n\
         CausalDB QUERY: 0.0020 seconds, 0.50 MB memory\n\
         SQLite QUERY: 0.0030 seconds, 0.75 MB memory\n\
         CausalDB file size: 2048 bytes\n\
         SQLite file size: 16384 bytes\n",
    );
    let [insert, query, memory, size] = panels(&metrics);

    assert_eq!(
        insert,
        ChartPanel {
            title: "Insert Performance (seconds)",
            y_label: "Time (seconds)",
            values: [0.01, 0.05],
            annotation: "5.00x faster".to_string(),
        }
    );
    assert_eq!(query.annotation, "1.50x faster");
    assert_eq!(memory.values, [1.0, 4.0]);
    assert_eq!(memory.annotation, "4.00x more memory");
    assert_eq!(size.title, "File Size (KB)");
    assert_eq!(size.values, [2.0, 16.0]);
    assert_eq!(size.annotation, "8.00x larger file");
}

#[test]
pub fn empty_metrics_give_flat_panels() {
    for panel in panels(&MetricSet::new()) {
        assert_eq!(panel.values, [0.0, 0.0]);
        assert_eq!(panel.y_max(), 1.0);
        assert!(panel.annotation.starts_with("0.00x "));
    }
}

#[test]
pub fn y_axis_leaves_headroom() {
    let [insert, ..] = panels(&extract("CausalDB INSERT: 1.0 seconds\nSQLite INSERT: 2.0 seconds"));

    assert_eq!(insert.values, [1.0, 2.0]);
    assert_eq!(insert.y_max(), 2.5);
}

#[test]
pub fn bars_are_labelled_by_system() {
    assert_eq!(ChartPanel::labels(), ["CausalDB", "SQLite"]);
}

#[test]
pub fn configured_font_takes_precedence() {
    let configured = PathBuf::from("/nonexistent/font.ttf");

    assert_eq!(locate_font(Some(configured.as_path())), Some(configured));
}

#[test]
pub fn unavailable_errors_are_classified() {
    assert!(ChartError::Unavailable.is_unavailable());
    assert!(ChartError::FontUnavailable.is_unavailable());
    assert!(!ChartError::Draw("backend".to_string()).is_unavailable());
}

#[cfg(feature = "charts")]
#[test]
pub fn unreadable_font_fails_without_writing() {
    let directory = tempfile::tempdir().unwrap();
    let mut options = options(directory.path());
    options.font = Some(directory.path().join("missing.ttf"));

    let result = render(&extract("SQLite INSERT: 2.0 seconds"), &options);

    assert!(matches!(result, Err(ChartError::FontRead { .. })));
    assert!(!options.path.exists());
}

/// width and height from the IHDR chunk of a PNG file
#[cfg(feature = "charts")]
fn png_size(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).unwrap();

    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(&bytes[12..16], b"IHDR");

    let read = |offset: usize| u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap());
    (read(16), read(20))
}

#[cfg(feature = "charts")]
#[test]
pub fn full_metrics_render_to_png() {
    // nothing to draw text with on this machine
    if locate_font(None).is_none() {
        return;
    }

    let directory = tempfile::tempdir().unwrap();
    let mut options = options(directory.path());
    options.dpi = 50;

    let metrics = extract(
        "CausalDB INSERT: 0.0123 seconds, 1.64 MB memory\n\
         SQLite INSERT: 0.4567 seconds, 3.28 MB memory\n\
         CausalDB QUERY: 0.0040 seconds, 0.50 MB memory\n\
         SQLite QUERY: 0.0210 seconds, 2.10 MB memory\n\
         CausalDB file size: 1680000 bytes\n\
         SQLite file size: 2457600 bytes\n",
    );

    render(&metrics, &options).unwrap();

    assert!(options.path.is_file());
    assert_eq!(png_size(&options.path), options.pixel_size());
    assert_eq!(options.pixel_size(), (750, 600));

    // a second render in the same process reuses the registered font
    render(&metrics, &options).unwrap();
    assert_eq!(png_size(&options.path), (750, 600));
}

#[cfg(not(feature = "charts"))]
#[test]
pub fn rendering_is_unavailable() {
    let directory = tempfile::tempdir().unwrap();
    let result = render(&MetricSet::new(), &options(directory.path()));

    assert!(matches!(result, Err(ChartError::Unavailable)));
}
