use std::{collections::BTreeMap, fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("Unknown metric name: {0}")]
    UnknownMetric(String),
}

/// The two data stores compared by the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum System {
    /// subject of the comparison
    CausalDb,
    /// baseline of the comparison
    Sqlite,
}

impl System {
    pub const ALL: [System; 2] = [System::CausalDb, System::Sqlite];

    /// name as printed by the benchmark executable
    pub fn label(self) -> &'static str {
        match self {
            Self::CausalDb => "CausalDB",
            Self::Sqlite => "SQLite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Insert,
    Query,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Query => "QUERY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Seconds,
    Megabytes,
    Bytes,
    Ratio,
}

/// Fixed vocabulary of metric names
///
/// Variant order is the canonical order of the report and of `Metric::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    CausalInsertTime,
    SqliteInsertTime,
    InsertSpeedup,
    CausalQueryTime,
    SqliteQueryTime,
    QuerySpeedup,
    CausalInsertMemory,
    SqliteInsertMemory,
    InsertMemoryRatio,
    CausalQueryMemory,
    SqliteQueryMemory,
    QueryMemoryRatio,
    CausalFileSize,
    SqliteFileSize,
    FileSizeRatio,
}

impl Metric {
    pub const ALL: [Metric; 15] = [
        Metric::CausalInsertTime,
        Metric::SqliteInsertTime,
        Metric::InsertSpeedup,
        Metric::CausalQueryTime,
        Metric::SqliteQueryTime,
        Metric::QuerySpeedup,
        Metric::CausalInsertMemory,
        Metric::SqliteInsertMemory,
        Metric::InsertMemoryRatio,
        Metric::CausalQueryMemory,
        Metric::SqliteQueryMemory,
        Metric::QueryMemoryRatio,
        Metric::CausalFileSize,
        Metric::SqliteFileSize,
        Metric::FileSizeRatio,
    ];

    /// All derived metrics, each computed from a (subject, baseline) operand pair
    pub const RATIOS: [Metric; 5] = [
        Metric::InsertSpeedup,
        Metric::QuerySpeedup,
        Metric::InsertMemoryRatio,
        Metric::QueryMemoryRatio,
        Metric::FileSizeRatio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CausalInsertTime => "causal_insert_time",
            Self::SqliteInsertTime => "sqlite_insert_time",
            Self::InsertSpeedup => "insert_speedup",
            Self::CausalQueryTime => "causal_query_time",
            Self::SqliteQueryTime => "sqlite_query_time",
            Self::QuerySpeedup => "query_speedup",
            Self::CausalInsertMemory => "causal_insert_memory",
            Self::SqliteInsertMemory => "sqlite_insert_memory",
            Self::InsertMemoryRatio => "insert_memory_ratio",
            Self::CausalQueryMemory => "causal_query_memory",
            Self::SqliteQueryMemory => "sqlite_query_memory",
            Self::QueryMemoryRatio => "query_memory_ratio",
            Self::CausalFileSize => "causal_file_size",
            Self::SqliteFileSize => "sqlite_file_size",
            Self::FileSizeRatio => "file_size_ratio",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Self::CausalInsertTime
            | Self::SqliteInsertTime
            | Self::CausalQueryTime
            | Self::SqliteQueryTime => Unit::Seconds,
            Self::CausalInsertMemory
            | Self::SqliteInsertMemory
            | Self::CausalQueryMemory
            | Self::SqliteQueryMemory => Unit::Megabytes,
            Self::CausalFileSize | Self::SqliteFileSize => Unit::Bytes,
            Self::InsertSpeedup
            | Self::QuerySpeedup
            | Self::InsertMemoryRatio
            | Self::QueryMemoryRatio
            | Self::FileSizeRatio => Unit::Ratio,
        }
    }

    pub fn is_ratio(self) -> bool {
        self.unit() == Unit::Ratio
    }

    /// (subject, baseline) operands of a derived metric, `None` for measured metrics
    pub fn operands(self) -> Option<(Metric, Metric)> {
        match self {
            Self::InsertSpeedup => Some((Self::CausalInsertTime, Self::SqliteInsertTime)),
            Self::QuerySpeedup => Some((Self::CausalQueryTime, Self::SqliteQueryTime)),
            Self::InsertMemoryRatio => Some((Self::CausalInsertMemory, Self::SqliteInsertMemory)),
            Self::QueryMemoryRatio => Some((Self::CausalQueryMemory, Self::SqliteQueryMemory)),
            Self::FileSizeRatio => Some((Self::CausalFileSize, Self::SqliteFileSize)),
            _ => None,
        }
    }

    /// system a measured metric belongs to, `None` for ratios
    pub fn system(self) -> Option<System> {
        match self {
            Self::CausalInsertTime
            | Self::CausalQueryTime
            | Self::CausalInsertMemory
            | Self::CausalQueryMemory
            | Self::CausalFileSize => Some(System::CausalDb),
            Self::SqliteInsertTime
            | Self::SqliteQueryTime
            | Self::SqliteInsertMemory
            | Self::SqliteQueryMemory
            | Self::SqliteFileSize => Some(System::Sqlite),
            _ => None,
        }
    }

    /// benchmark operation a timing or memory metric belongs to
    pub fn operation(self) -> Option<Operation> {
        match self {
            Self::CausalInsertTime
            | Self::SqliteInsertTime
            | Self::InsertSpeedup
            | Self::CausalInsertMemory
            | Self::SqliteInsertMemory
            | Self::InsertMemoryRatio => Some(Operation::Insert),
            Self::CausalQueryTime
            | Self::SqliteQueryTime
            | Self::QuerySpeedup
            | Self::CausalQueryMemory
            | Self::SqliteQueryMemory
            | Self::QueryMemoryRatio => Some(Operation::Query),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| MetricError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// seconds, megabytes and ratios
    Float(f64),
    /// byte counts
    Integer(u64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Float(value) => value,
            Self::Integer(value) => value as f64,
        }
    }

    pub fn as_u64(self) -> Option<u64> {
        match self {
            Self::Integer(value) => Some(value),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Metrics recovered from a single benchmark run
///
/// Absent keys mean the benchmark output did not contain the value. Only the
/// extractor populates a set, everything else gets read access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    values: BTreeMap<Metric, MetricValue>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, metric: Metric) -> Option<MetricValue> {
        self.values.get(&metric).copied()
    }

    pub fn get_f64(&self, metric: Metric) -> Option<f64> {
        self.get(metric).map(MetricValue::as_f64)
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// iterate in canonical metric order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, MetricValue)> + '_ {
        self.values.iter().map(|(metric, value)| (*metric, *value))
    }

    pub(crate) fn insert(&mut self, metric: Metric, value: MetricValue) {
        self.values.insert(metric, value);
    }
}
