use crate::report::{render_report, template, write_report, ReportError, HEADLINE_RATIOS};
use benchcmp_ingest::{extract, Metric, MetricSet};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use std::fs;

const FULL_OUTPUT: &str = "CausalDB INSERT: 0.0123 seconds, 1.64 MB memory, 10000 events
SQLite INSERT: 0.4567 seconds, 3.28 MB memory, 10000 events
CausalDB QUERY: 0.0040 seconds, 0.50 MB memory, 10000 events
SQLite QUERY: 0.0210 seconds, 2.10 MB memory, 10000 events
CausalDB file size: 1680000 bytes (1640.62 KB)
SQLite file size: 2457600 bytes (2400.00 KB)
";

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|date| date.and_hms_opt(14, 5, 7))
        .unwrap()
}

fn full_metrics() -> MetricSet {
    extract(FULL_OUTPUT)
}

#[test]
pub fn header_carries_timestamp() {
    let report = render_report(&full_metrics(), &timestamp()).unwrap();

    assert!(report.starts_with("\n# CausalDB vs SQLite Performance Analysis Report\nGenerated on: 2024-03-09 14:05:07\n\n## Executive Summary\n"));
}

#[test]
pub fn figures_match_independent_ratios() {
    let report = render_report(&full_metrics(), &timestamp()).unwrap();

    let insert = format!("{:.2}", 0.4567 / 0.0123);
    let query = format!("{:.2}", 0.0210 / 0.0040);
    let insert_memory = format!("{:.2}", 3.28 / 1.64);
    let query_memory = format!("{:.2}", 2.10 / 0.50);
    let file_size = format!("{:.2}", 2457600.0 / 1680000.0);

    assert!(report.contains(&format!("- **CausalDB is {insert}x faster**")));
    assert!(report.contains(&format!("- **CausalDB is {query}x faster**")));
    assert!(report.contains(&format!("- CausalDB uses {insert_memory}x less memory for inserts")));
    assert!(report.contains(&format!("- CausalDB uses {query_memory}x less memory for queries")));
    assert!(report.contains(&format!("- **CausalDB uses {file_size}x less storage**")));

    let conclusion = report.split("## Conclusion").nth(1).unwrap();
    assert!(conclusion.contains(&format!("- **{insert}x faster inserts**")));
    assert!(conclusion.contains(&format!("- **{query}x faster queries**")));
    assert!(conclusion.contains(&format!("- **{insert_memory}x less memory usage**")));
    assert!(conclusion.contains(&format!("- **{file_size}x smaller file sizes**")));
}

#[test]
pub fn measured_values_are_interpolated() {
    let report = render_report(&full_metrics(), &timestamp()).unwrap();

    assert!(report.contains("**Insert Performance:**\n- CausalDB: 0.0123 seconds\n- SQLite: 0.4567 seconds\n"));
    assert!(report.contains("**Query Performance:**\n- CausalDB: 0.0040 seconds\n- SQLite: 0.0210 seconds\n"));
    assert!(report.contains("- CausalDB file size: 1,680,000 bytes\n- SQLite file size: 2,457,600 bytes\n"));
}

#[test]
pub fn empty_metrics_render_zeros() {
    let report = render_report(&MetricSet::new(), &timestamp()).unwrap();

    assert!(report.contains("- CausalDB: 0.0000 seconds"));
    assert!(report.contains("- **CausalDB is 0.00x faster**"));
    assert!(report.contains("- CausalDB file size: 0 bytes"));

    for (_, claim) in HEADLINE_RATIOS {
        assert!(report.contains(&format!("- **0.00x {claim}**")));
    }
}

#[test]
pub fn static_sections_are_verbatim() {
    let report = render_report(&full_metrics(), &timestamp()).unwrap();

    for section in [
        template::DETAILED_ANALYSIS,
        template::TECHNICAL_SPECIFICATIONS,
        template::PERFORMANCE_IMPLICATIONS,
        template::CONCLUSION_OUTRO,
    ] {
        assert!(report.contains(section));
    }

    assert!(template::DETAILED_ANALYSIS.contains("(168 bytes per event)"));
    assert!(template::TECHNICAL_SPECIFICATIONS.contains("Fixed-size binary records (168 bytes)"));
}

#[test]
pub fn static_sections_do_not_depend_on_metrics() {
    let full = render_report(&full_metrics(), &timestamp()).unwrap();
    let empty = render_report(&MetricSet::new(), &timestamp()).unwrap();

    let tail = |report: &str| {
        report
            .split("## Detailed Analysis")
            .nth(1)
            .and_then(|rest| rest.split("## Conclusion").next())
            .map(str::to_string)
            .unwrap()
    };

    assert_eq!(tail(&full), tail(&empty));
}

#[test]
pub fn headline_ratios_are_ratios() {
    for (metric, _) in HEADLINE_RATIOS {
        assert!(metric.is_ratio());
    }

    assert!(!HEADLINE_RATIOS
        .iter()
        .any(|(metric, _)| *metric == Metric::QueryMemoryRatio));
}

#[test]
pub fn rewriting_is_byte_identical() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("performance_report.md");
    let metrics = full_metrics();

    fs::write(&path, "stale report").unwrap();

    let first = write_report(&path, &metrics, &timestamp()).unwrap();
    let first_bytes = fs::read(&path).unwrap();
    let second = write_report(&path, &metrics, &timestamp()).unwrap();
    let second_bytes = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first_bytes, first.into_bytes());
}

#[test]
pub fn unwritable_path_is_an_error() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("missing").join("report.md");

    match write_report(&path, &full_metrics(), &timestamp()) {
        Err(ReportError::Write { path: reported, .. }) => {
            assert!(reported.ends_with("report.md"))
        }
        other => panic!("expected a write error, got {other:?}"),
    }
}
