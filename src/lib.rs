//! Batch generation of expected-output files.
//!
//! For every input file directly under a test directory (skipping files whose
//! name marks them as prior outputs), run an external search command and
//! capture its stdout into `<input>.out`.
//!
//! ```no_run
//! use gen_test_output::{BatchRunner, RunnerConfig};
//!
//! let mut runner = BatchRunner::new(RunnerConfig::for_dir("tests"));
//! let summary = runner.run_all()?;
//! println!("{} of {} invocations succeeded", summary.succeeded, summary.total());
//! # Ok::<(), gen_test_output::GenError>(())
//! ```

pub use crate::config::{FailurePolicy, RunnerConfig};
pub use crate::discovery::{output_path_for, InputDiscoverer, PlannedInvocation};
pub use crate::errors::{GenError, GenResult};
pub use crate::invoke::{InvocationOutcome, Invoker, ProcessInvoker};
pub use crate::runner::{BatchRunner, Invocation, RunSummary};

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod invoke;
pub mod logging;
pub mod runner;
