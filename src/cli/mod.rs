//! The command-line interface.
//!
//! Parses arguments, installs logging, and dispatches to the library. Exit
//! status is 0 when every invocation succeeded and 1 otherwise.

use std::process;

use clap::Parser;

use crate::cli::args::{Command, GenArgs, ListArgs, RunArgs};
use crate::errors::GenError;
use crate::logging::init_tracing;
use crate::runner::BatchRunner;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = GenArgs::parse();
    init_tracing(args.verbose);

    let result = match args.command() {
        Command::Run(run_args) => handle_run(&run_args),
        Command::List(list_args) => handle_list(&list_args).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            let report = miette::Report::new(e);
            eprintln!("{report:?}");
            process::exit(1);
        }
    }
}

/// Handles the `run` subcommand. Returns whether every invocation succeeded.
fn handle_run(args: &RunArgs) -> Result<bool, GenError> {
    let config = args.to_config()?;
    let mut runner = BatchRunner::new(config);
    let summary = runner.run_all()?;

    let printed = if args.json {
        output::print_summary_json(&summary)
    } else {
        output::print_summary(&summary)
    };
    // A closed stdout must not hide the outcome of the run
    if let Err(e) = printed {
        tracing::warn!(error = %e, "failed to print run summary");
    }

    Ok(!summary.has_failures())
}

/// Handles the `list` subcommand.
fn handle_list(args: &ListArgs) -> Result<(), GenError> {
    let runner = BatchRunner::new(args.to_config()?);
    let plan = runner.plan()?;
    if let Err(e) = output::print_plan(&plan, runner.invoker()) {
        tracing::warn!(error = %e, "failed to print plan");
    }
    Ok(())
}
