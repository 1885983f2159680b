//! Console summary printed after a successful extraction

use crate::format;
use benchcmp_ingest::{Metric, MetricSet};
use std::fmt::Write;

pub const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// one block per comparison: header, both systems and the derived figure
fn write_block(
    output: &mut String,
    header: &str,
    lines: [(&str, String); 3],
) -> std::fmt::Result {
    writeln!(output)?;
    writeln!(output, "{header}:")?;

    for (label, value) in lines {
        writeln!(output, "  {:<10}{value}", format!("{label}:"))?;
    }

    Ok(())
}

pub fn render_summary(metrics: &MetricSet) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output)?;
    writeln!(output, "{}", rule())?;
    writeln!(output, "PERFORMANCE ANALYSIS RESULTS")?;
    writeln!(output, "{}", rule())?;

    write_block(
        &mut output,
        "Insert Performance",
        [
            (
                "CausalDB",
                format!("{} seconds", format::seconds(metrics, Metric::CausalInsertTime)),
            ),
            (
                "SQLite",
                format!("{} seconds", format::seconds(metrics, Metric::SqliteInsertTime)),
            ),
            (
                "Speedup",
                format!("{}x", format::ratio(metrics, Metric::InsertSpeedup)),
            ),
        ],
    )?;
    write_block(
        &mut output,
        "Query Performance",
        [
            (
                "CausalDB",
                format!("{} seconds", format::seconds(metrics, Metric::CausalQueryTime)),
            ),
            (
                "SQLite",
                format!("{} seconds", format::seconds(metrics, Metric::SqliteQueryTime)),
            ),
            (
                "Speedup",
                format!("{}x", format::ratio(metrics, Metric::QuerySpeedup)),
            ),
        ],
    )?;
    write_block(
        &mut output,
        "Memory Usage (Inserts)",
        [
            (
                "CausalDB",
                format!("{} MB", format::megabytes(metrics, Metric::CausalInsertMemory)),
            ),
            (
                "SQLite",
                format!("{} MB", format::megabytes(metrics, Metric::SqliteInsertMemory)),
            ),
            (
                "Ratio",
                format!("{}x", format::ratio(metrics, Metric::InsertMemoryRatio)),
            ),
        ],
    )?;
    write_block(
        &mut output,
        "File Size",
        [
            (
                "CausalDB",
                format!("{} bytes", format::bytes(metrics, Metric::CausalFileSize)),
            ),
            (
                "SQLite",
                format!("{} bytes", format::bytes(metrics, Metric::SqliteFileSize)),
            ),
            (
                "Ratio",
                format!("{}x", format::ratio(metrics, Metric::FileSizeRatio)),
            ),
        ],
    )?;

    Ok(output)
}

/// closing banner printed once all artifacts are written
pub fn render_closing() -> String {
    format!(
        "\n{rule}\nSUMMARY: CausalDB shows significant performance advantages\nfor causal event tracking use cases!\n{rule}\n",
        rule = rule()
    )
}
