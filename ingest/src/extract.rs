use crate::metrics::{Metric, MetricSet, MetricValue, Unit};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use tracing_unwrap::ResultExt;

/// Compiled pattern for one measured metric
#[derive(Debug)]
struct Pattern {
    metric: Metric,
    regex: Regex,
}

impl Pattern {
    /// first match in `output`, `None` if the line is missing or the number is malformed
    fn capture(&self, output: &str) -> Option<MetricValue> {
        let token = self.regex.captures(output)?.get(1)?.as_str();

        let value = match self.metric.unit() {
            Unit::Bytes => token.parse::<u64>().ok().map(MetricValue::Integer),
            _ => token.parse::<f64>().ok().map(MetricValue::Float),
        };

        if value.is_none() {
            warn!(
                metric = %self.metric,
                token = token,
                "Matched benchmark line but failed to parse its value, ignoring it"
            );
        }

        value
    }
}

static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    Metric::ALL
        .into_iter()
        .filter_map(|metric| {
            source_pattern(metric).map(|pattern| Pattern {
                metric,
                regex: Regex::new(&pattern).unwrap_or_log(),
            })
        })
        .collect()
});

/// Pattern locating a measured metric in the benchmark output
///
/// The first capture group holds the value. Memory patterns re-scan the timing
/// line (`<System> <OP>: <secs> seconds, <mb> MB memory`) on their own. Ratios
/// have no pattern since they are derived.
pub fn source_pattern(metric: Metric) -> Option<String> {
    let system = regex::escape(metric.system()?.label());

    match metric.unit() {
        Unit::Seconds => Some(format!(
            r"{system} {}: ([0-9.]+) seconds",
            metric.operation()?.label()
        )),
        Unit::Megabytes => Some(format!(
            r"{system} {}: [0-9.]+ seconds, ([0-9.]+) MB memory",
            metric.operation()?.label()
        )),
        Unit::Bytes => Some(format!(r"{system} file size: ([0-9]+) bytes")),
        Unit::Ratio => None,
    }
}

/// baseline / subject, undefined when the subject side is zero
pub fn ratio(subject: f64, baseline: f64) -> Option<f64> {
    if subject == 0.0 {
        return None;
    }

    Some(baseline / subject).filter(|value| value.is_finite())
}

/// Recover all metrics present in the captured benchmark output
///
/// Every pattern is matched once against the whole text. Operands are only
/// kept in pairs: a CausalDB figure without its SQLite counterpart (or the
/// other way around) is dropped together with its ratio. An empty set means
/// nothing was recognized.
#[tracing::instrument(level = "debug", skip(output), fields(length = output.len()))]
pub fn extract(output: &str) -> MetricSet {
    let captured: BTreeMap<Metric, MetricValue> = PATTERNS
        .iter()
        .filter_map(|pattern| pattern.capture(output).map(|value| (pattern.metric, value)))
        .collect();

    let mut metrics = MetricSet::new();

    for derived in Metric::RATIOS {
        let Some((subject, baseline)) = derived.operands() else {
            continue;
        };

        let (Some(&subject_value), Some(&baseline_value)) =
            (captured.get(&subject), captured.get(&baseline))
        else {
            if captured.contains_key(&subject) || captured.contains_key(&baseline) {
                debug!(metric = %derived, "Only one side of the comparison was reported, dropping it");
            }
            continue;
        };

        debug!(metric = %subject, value = %subject_value, "Extracted metric");
        debug!(metric = %baseline, value = %baseline_value, "Extracted metric");
        metrics.insert(subject, subject_value);
        metrics.insert(baseline, baseline_value);

        match ratio(subject_value.as_f64(), baseline_value.as_f64()) {
            Some(value) => metrics.insert(derived, MetricValue::Float(value)),
            None => warn!(
                metric = %derived,
                subject = %subject,
                "Cannot derive ratio from a zero {subject} value, leaving it out"
            ),
        }
    }

    debug!("Extracted {} metrics", metrics.len());

    metrics
}
