//! Metric extraction from the textual output of the CausalDB vs SQLite benchmark

pub mod extract;
pub mod metrics;


pub use extract::extract;
pub use metrics::{Metric, MetricError, MetricSet, MetricValue, Operation, System, Unit};
