use crate::{
    config::AnalyzerConfig,
    run::{BenchmarkRunner, RunError},
    AnalyzerError,
};
use benchcmp_analysis::{
    chart::{self, ChartError},
    report, summary,
};
use benchcmp_ingest::{extract, MetricSet};
use chrono::NaiveDateTime;
use std::{fs, io::Write, path::PathBuf};
use tracing::{info, warn};

pub const REMEDIATION: [&str; 2] = [
    "Install SQLite development libraries: sudo apt-get install libsqlite3-dev",
    "Build the benchmark: make benchmark",
];

/// Where the benchmark output comes from
#[derive(Debug, Clone)]
pub enum Input {
    /// run the configured benchmark executable
    Run,
    /// a previously captured benchmark output
    Captured(PathBuf),
}

#[derive(Debug)]
pub enum ChartStatus {
    Written(PathBuf),
    Disabled,
    Failed(ChartError),
}

#[derive(Debug)]
pub enum Outcome {
    /// benchmark missing or timed out, nothing was written
    BenchmarkFailed(RunError),
    /// output contained none of the known metrics, nothing was written
    NoMetrics,
    Completed {
        metrics: MetricSet,
        chart: ChartStatus,
        report: PathBuf,
    },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

fn acquire<W: Write>(
    config: &AnalyzerConfig,
    input: &Input,
    console: &mut W,
) -> Result<Result<String, RunError>, AnalyzerError> {
    match input {
        Input::Run => {
            writeln!(console, "Running CausalDB vs SQLite benchmark...")?;

            match BenchmarkRunner::load(&config.benchmark).run() {
                Ok(output) => Ok(Ok(output.stdout)),
                Err(e) if e.is_setup_failure() => Ok(Err(e)),
                Err(e) => Err(e.into()),
            }
        }
        Input::Captured(path) => {
            writeln!(console, "Reading benchmark output from {}...", path.display())?;

            fs::read_to_string(path)
                .map(Ok)
                .map_err(|source| AnalyzerError::Input {
                    path: path.display().to_string(),
                    source,
                })
        }
    }
}

fn render_chart<W: Write>(
    config: &AnalyzerConfig,
    metrics: &MetricSet,
    console: &mut W,
) -> Result<ChartStatus, AnalyzerError> {
    if !config.chart.enabled {
        info!("Chart rendering disabled");

        return Ok(ChartStatus::Disabled);
    }

    match chart::render(metrics, &config.chart.options()) {
        Ok(()) => {
            writeln!(
                console,
                "\n📊 Performance charts saved as '{}'",
                config.chart.path.display()
            )?;

            Ok(ChartStatus::Written(config.chart.path.clone()))
        }
        Err(e) => {
            if e.is_unavailable() {
                writeln!(console, "\n⚠️  Charts unavailable: {e}")?;
            } else {
                warn!(error = ?e, "Chart rendering failed, continuing with the report");
                writeln!(console, "\n⚠️  Failed to render charts: {e}")?;
            }

            Ok(ChartStatus::Failed(e))
        }
    }
}

/// Run the whole analysis: acquire output, extract, chart, report
///
/// Benchmark setup failures and unparseable output are regular outcomes, only
/// I/O problems on our side are errors.
pub fn analyze<W: Write>(
    config: &AnalyzerConfig,
    input: &Input,
    generated_at: &NaiveDateTime,
    console: &mut W,
) -> Result<Outcome, AnalyzerError> {
    let output = match acquire(config, input, console)? {
        Ok(output) => output,
        Err(e) => {
            writeln!(console, "Error: {e}")?;
            writeln!(console, "\nTo fix this:")?;
            for (step, hint) in REMEDIATION.iter().enumerate() {
                writeln!(console, "{}. {hint}", step + 1)?;
            }

            return Ok(Outcome::BenchmarkFailed(e));
        }
    };

    writeln!(console, "Parsing benchmark results...")?;
    let metrics = extract(&output);

    if metrics.is_empty() {
        writeln!(console, "Failed to parse benchmark results")?;

        return Ok(Outcome::NoMetrics);
    }

    write!(console, "{}", summary::render_summary(&metrics)?)?;

    let chart = render_chart(config, &metrics, console)?;

    report::write_report(&config.report.path, &metrics, generated_at)?;
    writeln!(
        console,
        "\n📄 Detailed report saved as '{}'",
        config.report.path.display()
    )?;

    write!(console, "{}", summary::render_closing())?;

    Ok(Outcome::Completed {
        metrics,
        chart,
        report: config.report.path.clone(),
    })
}
