//! Invoking the external search command.
//!
//! The runner only sees the [`Invoker`] trait. [`ProcessInvoker`] is the real
//! implementation; tests swap in fakes that never touch a process.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::RunnerConfig;
use crate::errors::{GenError, GenResult};

/// How a single invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Succeeded,
    /// Non-zero exit. `code` is `None` when the process died from a signal.
    Failed { code: Option<i32>, stderr: String },
    /// The command could not be started at all.
    SpawnFailed { reason: String },
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Succeeded)
    }

    /// One-line description used in logs and abort messages.
    pub fn describe(&self) -> String {
        match self {
            InvocationOutcome::Succeeded => "succeeded".to_string(),
            InvocationOutcome::Failed { code: Some(code), .. } => format!("exited with status {code}"),
            InvocationOutcome::Failed { code: None, .. } => "terminated by signal".to_string(),
            InvocationOutcome::SpawnFailed { reason } => format!("could not be started: {reason}"),
        }
    }
}

/// Runs the external command once for one input.
pub trait Invoker {
    /// Runs the command on `input` with its stdout going to `stdout`, and
    /// blocks until it exits.
    ///
    /// Returns `Err(GenError::Spawn)` when the command cannot be started; the
    /// runner turns that into [`InvocationOutcome::SpawnFailed`].
    fn invoke(&mut self, input: &Path, stdout: File) -> GenResult<InvocationOutcome>;

    /// Human-readable command line for `input`, for logs and `list`.
    fn command_line(&self, input: &Path) -> String;
}

/// Spawns `program args... <input>` without a shell.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    args: Vec<String>,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, input: &Path, stdout: File) -> GenResult<InvocationOutcome> {
        debug!(command = %self.command_line(input), "spawning");

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GenError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdout is redirected to the file, so only stderr is collected here
        let output = child.wait_with_output().map_err(|source| GenError::Wait {
            program: self.program.clone(),
            source,
        })?;
        trace!(status = ?output.status, stderr_len = output.stderr.len(), "process exited");

        if output.status.success() {
            return Ok(InvocationOutcome::Succeeded);
        }
        Ok(InvocationOutcome::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn command_line(&self, input: &Path) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.push(input.display().to_string());
        parts.join(" ")
    }
}
