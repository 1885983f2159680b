use benchcmp_analysis::chart::{ChartOptions, MAX_DPI};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Error,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, error, warn};

// check if a file is executable
#[cfg(unix)]
pub fn check_executable(path: &Path) -> Result<bool, ConfigErrors> {
    use std::os::unix::fs::MetadataExt;

    if !path.is_file() {
        Err(ConfigErrors::FileNotFound)
    } else {
        match fs::metadata(path) {
            Ok(metadata) => Ok((metadata.mode() & 0o111) != 0),
            Err(e) => Err(ConfigErrors::MetadataNotFound(e)),
        }
    }
}

#[cfg(not(unix))]
pub fn check_executable(path: &Path) -> Result<bool, ConfigErrors> {
    if path.is_file() {
        Ok(true)
    } else {
        Err(ConfigErrors::FileNotFound)
    }
}

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Failed to read configuration file {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("Configuration is not valid YAML")]
    ParseFailed(#[from] serde_yaml::Error),
    #[error("Configuration contains invalid values, see the log for details")]
    Invalid,
    #[error("File not found")]
    FileNotFound,
    #[error("Metadata not found")]
    MetadataNotFound(#[source] Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    // how to invoke the benchmark executable
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    // comparison figure output
    #[serde(default)]
    pub chart: ChartConfig,
    // markdown report output
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkConfig {
    #[serde(default = "default_exec")]
    pub exec: PathBuf,
    #[serde(default)]
    pub params: Vec<String>,
    // seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_chart_path")]
    pub path: PathBuf,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    // TrueType/OpenType font for chart text, probed from system locations if unset
    #[serde(default)]
    pub font: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            exec: default_exec(),
            params: Vec::new(),
            timeout: default_timeout(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_chart_path(),
            dpi: default_dpi(),
            font: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

impl BenchmarkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl ChartConfig {
    pub fn options(&self) -> ChartOptions {
        ChartOptions {
            path: self.path.clone(),
            dpi: self.dpi,
            font: self.font.clone(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigErrors> {
        // an empty document deserializes to null, treat it as "all defaults"
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(source)?)
    }

    /// load the configuration file if given, otherwise fall back to the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigErrors> {
        match path {
            Some(path) => {
                debug!(path = ?path, "Loading configuration");

                let source = fs::read_to_string(path).map_err(|source| ConfigErrors::ReadFailed {
                    path: path.display().to_string(),
                    source,
                })?;

                Self::from_yaml(&source)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration, returns true if any error was found
    ///
    /// All problems are logged instead of stopping at the first one.
    pub fn preflight_checks(&self) -> bool {
        let mut contains_error = false;

        if self.benchmark.timeout == 0 {
            error!("benchmark.timeout cannot be 0, the benchmark would never get a chance to run");
            contains_error = true;
        }

        if self.benchmark.exec.as_os_str().is_empty() {
            error!("benchmark.exec must point to the benchmark executable");
            contains_error = true;
        } else {
            // a missing executable is reported by the runner itself with remediation hints
            match check_executable(&self.benchmark.exec) {
                Ok(true) | Err(ConfigErrors::FileNotFound) => {}
                Ok(false) => warn!(
                    "benchmark.exec ({}) is not executable, this might cause problems",
                    self.benchmark.exec.to_string_lossy()
                ),
                Err(e) => warn!(
                    "Failed to determine if benchmark.exec ({}) is an executable: {e}",
                    self.benchmark.exec.to_string_lossy()
                ),
            }
        }

        if self.chart.enabled && self.chart.dpi == 0 {
            error!("chart.dpi cannot be 0");
            contains_error = true;
        } else if self.chart.enabled && self.chart.dpi > MAX_DPI {
            error!(
                "chart.dpi ({}) is above the maximum of {MAX_DPI}",
                self.chart.dpi
            );
            contains_error = true;
        }

        if self.chart.enabled && self.chart.path == self.report.path {
            error!(
                "chart.path and report.path both point to {}, one would overwrite the other",
                self.report.path.to_string_lossy()
            );
            contains_error = true;
        }

        if let Some(ref font) = self.chart.font {
            if self.chart.enabled && !font.is_file() {
                warn!(
                    "chart.font ({}) was not found, charts will be skipped",
                    font.to_string_lossy()
                );
            }
        }

        contains_error
    }
}

fn default_exec() -> PathBuf {
    PathBuf::from("./benchmark")
}

fn default_timeout() -> u64 {
    60
}

fn default_enabled() -> bool {
    true
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("performance_comparison.png")
}

fn default_dpi() -> u32 {
    300
}

fn default_report_path() -> PathBuf {
    PathBuf::from("performance_report.md")
}
