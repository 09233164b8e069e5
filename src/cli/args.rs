//! Defines the command-line arguments and subcommands for the CLI.
//!
//! Every flag is optional. Invoked bare, the tool behaves like the historical
//! script: `run` over `tests/` with `krun --search`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{FailurePolicy, RunnerConfig};
use crate::errors::GenResult;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "gen-test-output",
    version,
    about = "Run a search command over every test input and capture its output into <input>.out."
)]
pub struct GenArgs {
    /// Log debug details to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl GenArgs {
    /// The subcommand to execute; `run` with defaults when none was given.
    pub fn command(self) -> Command {
        self.command.unwrap_or_default()
    }
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Invoke the command on every input and write the .out files.
    Run(RunArgs),
    /// Show the invocations a run would perform, without running them.
    List(ListArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Run(RunArgs::default())
    }
}

/// Which files are inputs and where their outputs go.
#[derive(Debug, Default, Args)]
pub struct SelectionArgs {
    /// Directory holding the test inputs [default: tests].
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// YAML config file; flags given here override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suffix appended to each input path to name its output [default: .out].
    #[arg(long)]
    pub suffix: Option<String>,

    /// Files whose name contains this are skipped as prior outputs [default: .out].
    #[arg(long)]
    pub exclude_marker: Option<String>,
}

/// The external command to run per input.
#[derive(Debug, Default, Args)]
pub struct CommandArgs {
    /// Program to invoke [default: krun].
    #[arg(long)]
    pub program: Option<String>,

    /// Argument placed before the input path; repeat for several [default: --search].
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Pass the input path as the only argument.
    #[arg(long, conflicts_with = "args")]
    pub no_args: bool,
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub command: CommandArgs,

    /// Stop at the first input whose command fails or cannot be started.
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the run summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub command: CommandArgs,
}

// ============================================================================
// CONFIG RESOLUTION - flag > config file > default
// ============================================================================

impl SelectionArgs {
    fn resolve(&self) -> GenResult<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_yaml_file(path)?,
            None => RunnerConfig::default(),
        };
        if let Some(dir) = &self.dir {
            config.test_dir = dir.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if let Some(marker) = &self.exclude_marker {
            config.exclude_marker = marker.clone();
        }
        Ok(config)
    }
}

impl CommandArgs {
    fn apply(&self, config: &mut RunnerConfig) {
        if let Some(program) = &self.program {
            config.program = program.clone();
        }
        if self.no_args {
            config.args.clear();
        } else if !self.args.is_empty() {
            config.args = self.args.clone();
        }
    }
}

impl RunArgs {
    pub fn to_config(&self) -> GenResult<RunnerConfig> {
        let mut config = self.selection.resolve()?;
        self.command.apply(&mut config);
        if self.fail_fast {
            config.failure_policy = FailurePolicy::FailFast;
        }
        Ok(config)
    }
}

impl ListArgs {
    pub fn to_config(&self) -> GenResult<RunnerConfig> {
        let mut config = self.selection.resolve()?;
        self.command.apply(&mut config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Command {
        GenArgs::try_parse_from(argv).unwrap().command()
    }

    #[test]
    fn test_bare_invocation_is_default_run() {
        let Command::Run(args) = parse(&["gen-test-output"]) else {
            panic!("expected run");
        };
        assert_eq!(args.to_config().unwrap(), RunnerConfig::default());
    }

    #[test]
    fn test_hyphenated_args_are_accepted() {
        let Command::Run(args) = parse(&[
            "gen-test-output",
            "run",
            "cases",
            "--program",
            "grep",
            "--arg",
            "-c",
            "--arg",
            "needle",
        ]) else {
            panic!("expected run");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.test_dir, PathBuf::from("cases"));
        assert_eq!(config.program, "grep");
        assert_eq!(config.args, vec!["-c".to_string(), "needle".to_string()]);
    }

    #[test]
    fn test_no_args_clears_default_flag() {
        let Command::List(args) = parse(&["gen-test-output", "list", "--program", "cat", "--no-args"])
        else {
            panic!("expected list");
        };
        assert!(args.to_config().unwrap().args.is_empty());
    }

    #[test]
    fn test_fail_fast_sets_policy() {
        let Command::Run(args) = parse(&["gen-test-output", "run", "--fail-fast"]) else {
            panic!("expected run");
        };
        assert_eq!(args.to_config().unwrap().failure_policy, FailurePolicy::FailFast);
    }
}
