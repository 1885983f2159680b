//! Rendering of extracted benchmark metrics: chart, Markdown report and console summary

pub mod chart;
pub mod format;
pub mod report;
pub mod summary;

#[cfg(test)]
mod chart_test;
#[cfg(test)]
mod report_test;
