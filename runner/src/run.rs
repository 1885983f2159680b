use crate::config::BenchmarkConfig;
use std::{
    io::{self, Read},
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_unwrap::OptionExt;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Benchmark executable not found. Run 'make benchmark' first.")]
    NotFound,
    #[error("Benchmark timed out")]
    TimedOut,
    #[error("Failed to spawn benchmark")]
    Spawn(#[source] io::Error),
    #[error("Failed to wait for the benchmark process")]
    Wait(#[source] io::Error),
}

impl RunError {
    /// the benchmark isn't built or didn't finish, both are fixed by the user rather than a bug
    pub fn is_setup_failure(&self) -> bool {
        matches!(self, Self::NotFound | Self::TimedOut)
    }
}

#[derive(Debug, Clone)]
/// container for information extracted from running the benchmark
pub struct RunOutput {
    pub runtime: Duration,
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    pub exec: PathBuf,
    pub params: Vec<String>,
    pub timeout: Duration,
}

/// read a child pipe to completion on its own thread so the child never blocks on a full pipe
fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    })
}

fn collect(handle: JoinHandle<io::Result<String>>) -> Result<String, RunError> {
    match handle.join() {
        Ok(result) => result.map_err(RunError::Wait),
        Err(_) => Err(RunError::Wait(io::Error::new(
            io::ErrorKind::Other,
            "pipe reader panicked",
        ))),
    }
}

impl BenchmarkRunner {
    pub fn new(exec: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            exec: exec.into(),
            params: Vec::new(),
            timeout,
        }
    }

    pub fn load(config: &BenchmarkConfig) -> Self {
        Self {
            exec: config.exec.clone(),
            params: config.params.clone(),
            timeout: config.timeout(),
        }
    }

    /// Run the benchmark to completion and capture its output
    ///
    /// A non-zero exit status is not an error, whatever was printed is still returned.
    #[tracing::instrument(level = "debug")]
    pub fn run(&self) -> Result<RunOutput, RunError> {
        let start = Instant::now();

        let mut child = match Command::new(&self.exec)
            .args(&self.params)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(exec = ?self.exec, "Benchmark executable not found");

                return Err(RunError::NotFound);
            }
            Err(e) => return Err(RunError::Spawn(e)),
        };

        let stdout = drain(child.stdout.take().unwrap_or_log());
        let stderr = drain(child.stderr.take().unwrap_or_log());

        debug!("Benchmark waiting on {}", child.id());
        let status = match child.wait_timeout(self.timeout).map_err(RunError::Wait)? {
            Some(status) => status,
            None => {
                debug!("Benchmark ran into timeout, killing it");

                // the child may have exited between the timeout and the kill
                if let Err(e) = child.kill() {
                    warn!(error = ?e, "Failed to kill benchmark after timeout");
                }
                child.wait().map_err(RunError::Wait)?;

                return Err(RunError::TimedOut);
            }
        };
        let runtime = start.elapsed();

        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        if status.success() {
            info!(
                "Benchmark finished in {} ms | status: {status}",
                runtime.as_millis()
            );
            if !stderr.is_empty() {
                debug!(stderr = %stderr, "Benchmark wrote to stderr");
            }
        } else {
            warn!(
                stderr = %stderr,
                "Benchmark exited with {status}, attempting to continue with its output"
            );
        }

        debug!("Output from benchmark: {stdout}");

        Ok(RunOutput {
            runtime,
            stdout,
            stderr,
            status,
        })
    }
}
