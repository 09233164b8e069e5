//! Handles all user-facing output for the CLI.
//!
//! Run summaries and plans go to stdout, colorized when stdout is a terminal.
//! Errors are rendered by `miette` on stderr from `cli::run`.

use std::io::{self, IsTerminal, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::discovery::PlannedInvocation;
use crate::invoke::{InvocationOutcome, Invoker};
use crate::runner::RunSummary;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints one line per invocation, failed commands' stderr, and a totals line.
pub fn print_summary(summary: &RunSummary) -> io::Result<()> {
    let mut stdout = stdout_stream();

    for invocation in &summary.invocations {
        let (mark, color) = match invocation.outcome {
            InvocationOutcome::Succeeded => ("✓", Color::Green),
            _ => ("✗", Color::Red),
        };
        stdout.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(stdout, "{mark}")?;
        stdout.reset()?;
        write!(
            stdout,
            " {} -> {}",
            invocation.input.display(),
            invocation.output.display()
        )?;
        if invocation.outcome.is_success() {
            writeln!(stdout)?;
            continue;
        }
        writeln!(stdout, " ({})", invocation.outcome.describe())?;
        if let InvocationOutcome::Failed { stderr, .. } = &invocation.outcome {
            for line in stderr.lines() {
                writeln!(stdout, "    {line}")?;
            }
        }
    }

    if summary.total() == 0 {
        writeln!(stdout, "No inputs found")?;
        return Ok(());
    }

    writeln!(stdout)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "Summary:")?;
    stdout.reset()?;
    write!(stdout, " ")?;
    if summary.succeeded > 0 {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    }
    write!(stdout, "{} succeeded", summary.succeeded)?;
    stdout.reset()?;
    write!(stdout, ", ")?;
    if summary.failed > 0 {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    }
    write!(stdout, "{} failed", summary.failed)?;
    stdout.reset()?;
    writeln!(stdout, " ({} total)", summary.total())
}

/// Prints the summary as a single pretty JSON document.
pub fn print_summary_json(summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
}

/// Prints each planned invocation as the shell line it stands for.
pub fn print_plan<I: Invoker>(plan: &[PlannedInvocation], invoker: &I) -> io::Result<()> {
    let mut stdout = stdout_stream();
    for planned in plan {
        writeln!(
            stdout,
            "{} > {}",
            invoker.command_line(&planned.input),
            planned.output.display()
        )?;
    }
    if plan.is_empty() {
        writeln!(stdout, "No inputs found")?;
    }
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn stdout_stream() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}
