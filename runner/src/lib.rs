//! Runs the CausalDB vs SQLite benchmark and turns its output into a chart and a report

pub mod config;
pub mod pipeline;
pub mod run;


use benchcmp_analysis::report::ReportError;
use config::ConfigErrors;
use run::RunError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("Failed to read benchmark output from {path}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Failed to write to the console")]
    Console(#[from] io::Error),
    #[error("Failed to format the summary")]
    Format(#[from] std::fmt::Error),
}
