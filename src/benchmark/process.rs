//! External process invocation
//!
//! Running a binary is behind the [`ProcessRunner`] trait so the trial and
//! session logic can be driven by canned output in tests.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::STDERR_EXCERPT_CHARS;
use crate::error::TrialError;

/// A fully formed command line: `<program> -n <threads> <workload>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build the task-system command line for one workload
    pub fn task_system(program: impl Into<PathBuf>, num_threads: usize, workload: &str) -> Self {
        Self {
            program: program.into(),
            args: vec![
                "-n".to_string(),
                num_threads.to_string(),
                workload.to_string(),
            ],
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a process that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Stdout followed by stderr
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// Capability to run an external program to completion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation and return its output, or why it failed
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, TrialError>;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// Create a runner; `timeout` of `None` waits indefinitely
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, TrialError> {
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TrialError::Launch {
                program: invocation.program.display().to_string(),
                message: e.to_string(),
            })?;

        let output = match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                // Dropping the future drops the child, which kills it
                Err(_) => return Err(TrialError::Timeout { after: limit }),
            },
            None => child.wait_with_output().await,
        }
        .map_err(|e| TrialError::Launch {
            program: invocation.program.display().to_string(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            #[cfg(unix)]
            {
                use std::os::unix::process::ExitStatusExt;
                if let Some(signal) = output.status.signal() {
                    return Err(TrialError::Killed { signal });
                }
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TrialError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect(),
            });
        }

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
