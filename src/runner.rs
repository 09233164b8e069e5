//! The batch pass: one external invocation per input, strictly in sequence.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{FailurePolicy, RunnerConfig};
use crate::discovery::{InputDiscoverer, PlannedInvocation};
use crate::errors::{GenError, GenResult};
use crate::invoke::{InvocationOutcome, Invoker, ProcessInvoker};

/// One input, the file its output went to, and how the command ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: InvocationOutcome,
}

/// Result summary for a whole run, in processing order.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub invocations: Vec<Invocation>,
}

impl RunSummary {
    pub fn record(&mut self, invocation: Invocation) {
        if invocation.outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.invocations.push(invocation);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn failures(&self) -> impl Iterator<Item = &Invocation> {
        self.invocations.iter().filter(|inv| !inv.outcome.is_success())
    }
}

/// Drives the external command over every input in the test directory.
pub struct BatchRunner<I: Invoker = ProcessInvoker> {
    config: RunnerConfig,
    invoker: I,
}

impl BatchRunner<ProcessInvoker> {
    /// Runner that spawns the configured program.
    pub fn new(config: RunnerConfig) -> Self {
        let invoker = ProcessInvoker::from_config(&config);
        Self { config, invoker }
    }
}

impl<I: Invoker> BatchRunner<I> {
    pub fn with_invoker(config: RunnerConfig, invoker: I) -> Self {
        Self { config, invoker }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Inputs and output paths the next run will use, without running anything.
    pub fn plan(&self) -> GenResult<Vec<PlannedInvocation>> {
        InputDiscoverer::plan(
            &self.config.test_dir,
            &self.config.exclude_marker,
            &self.config.suffix,
        )
    }

    /// Runs the command once per input and returns what happened.
    ///
    /// Listing the directory happens up front, so an enumeration error is
    /// returned before any process is spawned. Failing or missing commands are
    /// recorded and skipped past unless the policy is
    /// [`FailurePolicy::FailFast`]. Failing to create an output file is always
    /// fatal.
    pub fn run_all(&mut self) -> GenResult<RunSummary> {
        let planned = self.plan()?;
        info!(
            dir = %self.config.test_dir.display(),
            inputs = planned.len(),
            "starting batch run"
        );

        let mut summary = RunSummary::default();
        for PlannedInvocation { input, output } in planned {
            let outcome = self.invoke_one(&input, &output)?;

            if !outcome.is_success() && self.config.failure_policy == FailurePolicy::FailFast {
                return Err(GenError::InvocationAborted {
                    input,
                    reason: outcome.describe(),
                });
            }

            summary.record(Invocation {
                input,
                output,
                outcome,
            });
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch run finished"
        );
        Ok(summary)
    }

    fn invoke_one(&mut self, input: &Path, output: &Path) -> GenResult<InvocationOutcome> {
        // Truncates any output left over from an earlier run
        let stdout = File::create(output).map_err(|source| GenError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;

        let outcome = match self.invoker.invoke(input, stdout) {
            Ok(outcome) => outcome,
            Err(GenError::Spawn { program, source }) => {
                warn!(%program, input = %input.display(), error = %source, "command could not be started");
                InvocationOutcome::SpawnFailed {
                    reason: source.to_string(),
                }
            }
            Err(other) => return Err(other),
        };

        match &outcome {
            InvocationOutcome::Succeeded => {
                debug!(input = %input.display(), output = %output.display(), "captured output");
            }
            InvocationOutcome::Failed { code, stderr } => {
                warn!(
                    command = %self.invoker.command_line(input),
                    ?code,
                    stderr = %stderr.trim_end(),
                    "command failed"
                );
            }
            InvocationOutcome::SpawnFailed { .. } => {}
        }
        Ok(outcome)
    }
}
