use benchcmp_ingest::{Metric, MetricSet, MetricValue};
use itertools::Itertools;

/// value of `metric`, zero if the benchmark didn't report it
pub fn value_or_zero(metrics: &MetricSet, metric: Metric) -> f64 {
    metrics.get_f64(metric).unwrap_or(0.0)
}

/// byte count of `metric`, zero if the benchmark didn't report it
pub fn bytes_or_zero(metrics: &MetricSet, metric: Metric) -> u64 {
    match metrics.get(metric) {
        Some(MetricValue::Integer(bytes)) => bytes,
        Some(MetricValue::Float(bytes)) => bytes as u64,
        None => 0,
    }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    value
        .to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(String::from_utf8_lossy)
        .join(",")
}

pub fn seconds(metrics: &MetricSet, metric: Metric) -> String {
    format!("{:.4}", value_or_zero(metrics, metric))
}

pub fn megabytes(metrics: &MetricSet, metric: Metric) -> String {
    format!("{:.2}", value_or_zero(metrics, metric))
}

pub fn ratio(metrics: &MetricSet, metric: Metric) -> String {
    format!("{:.2}", value_or_zero(metrics, metric))
}

pub fn bytes(metrics: &MetricSet, metric: Metric) -> String {
    group_thousands(bytes_or_zero(metrics, metric))
}
