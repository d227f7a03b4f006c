//! External command execution
//!
//! This module provides:
//! - The `CommandRunner` trait used by package manager backends and the sequencer
//! - A tokio-backed `SystemRunner` that executes real processes

use crate::error::ProcessError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Whether the process exited successfully
    pub success: bool,
    /// Exit code, -1 when terminated by a signal
    pub code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl ProcessOutput {
    /// Create a successful output carrying `stdout`
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output with the given exit code and `stderr`
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Standard output, or standard error when nothing was written to stdout
    pub fn merged(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            self.stdout.clone()
        }
    }
}

/// Runs external commands in a working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `args[0]` with the remaining arguments and capture its output
    ///
    /// A non-zero exit is not an error here; only failing to start the process is.
    async fn execute(&self, args: &[String], working_dir: &Path)
        -> Result<ProcessOutput, ProcessError>;
}

/// Run a command and fail on non-zero exit, returning the merged output
pub async fn run_checked(
    runner: &dyn CommandRunner,
    args: &[String],
    working_dir: &Path,
) -> Result<String, ProcessError> {
    let output = runner.execute(args, working_dir).await?;
    if !output.success {
        return Err(ProcessError::Failed {
            command: args.join(" "),
            code: output.code,
            output: output.merged().trim().to_string(),
        });
    }
    Ok(output.merged())
}

/// Run a command whose exit status carries no meaning, returning the merged output
pub async fn run_unchecked(
    runner: &dyn CommandRunner,
    args: &[String],
    working_dir: &Path,
) -> Result<String, ProcessError> {
    let output = runner.execute(args, working_dir).await?;
    if !output.success {
        debug!(command = %args.join(" "), code = output.code, "ignoring exit status");
    }
    Ok(output.merged())
}

/// Runner that spawns real processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn execute(
        &self,
        args: &[String],
        working_dir: &Path,
    ) -> Result<ProcessOutput, ProcessError> {
        let (program, rest) = args.split_first().ok_or(ProcessError::EmptyCommand)?;
        let command_line = args.join(" ");
        debug!(command = %command_line, dir = %working_dir.display(), "executing");

        let output = Command::new(program)
            .args(rest)
            .current_dir(working_dir)
            .output()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: command_line.clone(),
                source,
            })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
