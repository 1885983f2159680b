use benchcmp_runner::{
    config::{AnalyzerConfig, ConfigErrors},
    pipeline::{analyze, Input},
    AnalyzerError,
};
use chrono::Local;
use clap::{ArgAction, Parser};
use std::{io, path::PathBuf, process::ExitCode};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Analyze the CausalDB vs SQLite benchmark and write a chart and a Markdown report
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// YAML configuration file, defaults apply if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Analyze previously captured benchmark output instead of running the benchmark
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Skip rendering the comparison chart
    #[arg(long)]
    no_chart: bool,

    /// Increase log verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: Cli) -> Result<(), AnalyzerError> {
    let mut config = AnalyzerConfig::load(cli.config.as_deref())?;

    if cli.no_chart {
        config.chart.enabled = false;
    }

    if config.preflight_checks() {
        return Err(ConfigErrors::Invalid.into());
    }

    let input = match cli.input {
        Some(path) => Input::Captured(path),
        None => Input::Run,
    };

    analyze(
        &config,
        &input,
        &Local::now().naive_local(),
        &mut io::stdout().lock(),
    )?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Analysis aborted");
            eprintln!("Error: {e}");

            ExitCode::FAILURE
        }
    }
}
