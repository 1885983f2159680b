#![allow(dead_code)]

use benchcmp_runner::config::AnalyzerConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const FULL_OUTPUT: &str = "=== CausalDB vs SQLite Benchmark ===
Testing with 10000 events...

Running INSERT benchmarks...
CausalDB INSERT: 0.0123 seconds, 1.64 MB memory, 10000 events
SQLite INSERT: 0.4567 seconds, 3.28 MB memory, 10000 events
CausalDB is 37.13x faster for inserts

Running QUERY benchmarks...
CausalDB QUERY: 0.0040 seconds, 0.50 MB memory, 10000 events
SQLite QUERY: 0.0210 seconds, 2.10 MB memory, 10000 events
CausalDB is 5.25x faster for queries

=== FILE SIZE COMPARISON ===
CausalDB file size: 1680000 bytes (1640.62 KB)
SQLite file size: 2457600 bytes (2400.00 KB)
Size ratio (SQLite/CausalDB): 1.46x
";

/// shell script run through /bin/sh, avoids exec'ing a freshly written file
pub fn script(directory: &Path, name: &str, body: &str) -> PathBuf {
    let path = directory.join(name);
    fs::write(&path, body).unwrap();

    path
}

/// benchmark script printing `output` verbatim
pub fn printing_script(directory: &Path, output: &str) -> PathBuf {
    script(
        directory,
        "benchmark.sh",
        &format!("cat <<'BENCHMARK_OUTPUT'\n{output}BENCHMARK_OUTPUT\n"),
    )
}

/// configuration writing all artifacts into `directory`, charts disabled
pub fn config_in(directory: &Path) -> AnalyzerConfig {
    let mut config = AnalyzerConfig::default();
    config.benchmark.exec = directory.join("benchmark");
    config.chart.enabled = false;
    config.chart.path = directory.join("performance_comparison.png");
    config.report.path = directory.join("performance_report.md");

    config
}

/// configuration running `script` through /bin/sh
pub fn config_running(directory: &Path, script: &Path) -> AnalyzerConfig {
    let mut config = config_in(directory);
    config.benchmark.exec = PathBuf::from("/bin/sh");
    config.benchmark.params = vec![script.to_string_lossy().into_owned()];

    config
}
