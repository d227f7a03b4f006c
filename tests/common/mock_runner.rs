//! Scripted command runner for testing

#![allow(dead_code)]

use async_trait::async_trait;
use depbot::error::ProcessError;
use depbot::exec::{CommandRunner, ProcessOutput};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A file write performed when a matching command runs
struct ScriptedWrite {
    prefix: String,
    path: PathBuf,
    contents: String,
}

/// Command runner answering from a prefix table
///
/// Features:
/// - First matching prefix wins; unmatched commands succeed with empty output
/// - Call tracking for verification
/// - File writes to simulate a command rewriting the manifest
pub struct MockRunner {
    responses: Mutex<Vec<(String, ProcessOutput)>>,
    writes: Mutex<Vec<ScriptedWrite>>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer commands starting with `prefix` with `output`
    pub fn respond(self, prefix: &str, output: ProcessOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), output));
        self
    }

    /// Answer commands starting with `prefix` with a successful `stdout`
    pub fn respond_ok(self, prefix: &str, stdout: impl Into<String>) -> Self {
        self.respond(prefix, ProcessOutput::success(stdout))
    }

    /// Fail commands starting with `prefix` with exit code 1
    pub fn fail(self, prefix: &str, stderr: &str) -> Self {
        self.respond(prefix, ProcessOutput::failure(1, stderr))
    }

    /// Write `contents` to `path` whenever a command starting with `prefix` runs
    pub fn write_on(self, prefix: &str, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.writes.lock().unwrap().push(ScriptedWrite {
            prefix: prefix.to_string(),
            path: path.into(),
            contents: contents.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that modify the project (`composer update` / `composer require`)
    pub fn update_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("composer update") || c.starts_with("composer require"))
            .collect()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn execute(
        &self,
        args: &[String],
        _working_dir: &Path,
    ) -> Result<ProcessOutput, ProcessError> {
        let line = args.join(" ");
        self.calls.lock().unwrap().push(line.clone());

        for write in self.writes.lock().unwrap().iter() {
            if line.starts_with(write.prefix.as_str()) {
                std::fs::write(&write.path, &write.contents).unwrap();
            }
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| ProcessOutput::success("")))
    }
}
