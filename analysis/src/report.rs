pub mod template;

use crate::format;
use benchcmp_ingest::{Metric, MetricSet};
use chrono::NaiveDateTime;
use std::{fmt::Write, fs, io, path::Path};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to format report")]
    Format(#[from] std::fmt::Error),
    #[error("Failed to write report to {path}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ratios restated in the conclusion, in order
pub const HEADLINE_RATIOS: [(Metric, &str); 4] = [
    (Metric::InsertSpeedup, "faster inserts"),
    (Metric::QuerySpeedup, "faster queries"),
    (Metric::InsertMemoryRatio, "less memory usage"),
    (Metric::FileSizeRatio, "smaller file sizes"),
];

fn write_executive_summary(output: &mut String, metrics: &MetricSet) -> std::fmt::Result {
    writeln!(output, "## Executive Summary")?;
    writeln!(output)?;
    writeln!(output, "{}", template::SUMMARY_INTRO)?;
    writeln!(output)?;
    writeln!(output, "### Key Performance Metrics")?;
    writeln!(output)?;

    let operations = [
        (
            "Insert",
            Metric::CausalInsertTime,
            Metric::SqliteInsertTime,
            Metric::InsertSpeedup,
        ),
        (
            "Query",
            Metric::CausalQueryTime,
            Metric::SqliteQueryTime,
            Metric::QuerySpeedup,
        ),
    ];

    for (name, causal, sqlite, speedup) in operations {
        writeln!(output, "**{name} Performance:**")?;
        writeln!(
            output,
            "- CausalDB: {} seconds",
            format::seconds(metrics, causal)
        )?;
        writeln!(output, "- SQLite: {} seconds", format::seconds(metrics, sqlite))?;
        writeln!(
            output,
            "- **CausalDB is {}x faster**",
            format::ratio(metrics, speedup)
        )?;
        writeln!(output)?;
    }

    writeln!(output, "**Memory Efficiency:**")?;
    writeln!(
        output,
        "- CausalDB uses {}x less memory for inserts",
        format::ratio(metrics, Metric::InsertMemoryRatio)
    )?;
    writeln!(
        output,
        "- CausalDB uses {}x less memory for queries",
        format::ratio(metrics, Metric::QueryMemoryRatio)
    )?;
    writeln!(output)?;

    writeln!(output, "**Storage Efficiency:**")?;
    writeln!(
        output,
        "- CausalDB file size: {} bytes",
        format::bytes(metrics, Metric::CausalFileSize)
    )?;
    writeln!(
        output,
        "- SQLite file size: {} bytes",
        format::bytes(metrics, Metric::SqliteFileSize)
    )?;
    writeln!(
        output,
        "- **CausalDB uses {}x less storage**",
        format::ratio(metrics, Metric::FileSizeRatio)
    )
}

fn write_conclusion(output: &mut String, metrics: &MetricSet) -> std::fmt::Result {
    writeln!(output, "## Conclusion")?;
    writeln!(output)?;
    writeln!(output, "{}", template::CONCLUSION_INTRO)?;

    for (metric, claim) in HEADLINE_RATIOS {
        writeln!(output, "- **{}x {claim}**", format::ratio(metrics, metric))?;
    }

    writeln!(output)?;
    writeln!(output, "{}", template::CONCLUSION_OUTRO)
}

/// Render the full Markdown report
///
/// Output only depends on `metrics` and `generated_at`, missing metrics are
/// printed as zero.
pub fn render_report(
    metrics: &MetricSet,
    generated_at: &NaiveDateTime,
) -> Result<String, ReportError> {
    let mut output = String::new();

    writeln!(output)?;
    writeln!(output, "{}", template::TITLE)?;
    writeln!(
        output,
        "Generated on: {}",
        generated_at.format(TIMESTAMP_FORMAT)
    )?;
    writeln!(output)?;

    write_executive_summary(&mut output, metrics)?;
    writeln!(output)?;

    for section in [
        template::DETAILED_ANALYSIS,
        template::TECHNICAL_SPECIFICATIONS,
        template::PERFORMANCE_IMPLICATIONS,
    ] {
        writeln!(output, "{section}")?;
    }

    write_conclusion(&mut output, metrics)?;

    Ok(output)
}

/// Render the report and write it to `path`, replacing any previous report
pub fn write_report(
    path: &Path,
    metrics: &MetricSet,
    generated_at: &NaiveDateTime,
) -> Result<String, ReportError> {
    let report = render_report(metrics, generated_at)?;

    debug!(path = ?path, bytes = report.len(), "Writing report");

    fs::write(path, &report).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = ?path, "Report written");

    Ok(report)
}
