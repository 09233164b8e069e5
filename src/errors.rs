//! Error handling for the batch runner.
//!
//! Every failure the library can surface is a [`GenError`] variant. Each one
//! carries a stable `miette` diagnostic code and a help line, so the CLI can
//! hand the error straight to `miette::Report` for rendering.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Shorthand result type used across the crate.
pub type GenResult<T> = Result<T, GenError>;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    // Enumeration errors: fatal, nothing has been invoked yet
    #[error("failed to list test directory '{}'", path.display())]
    #[diagnostic(
        code(gen_test_output::read_dir),
        help("check that the directory exists and is readable")
    )]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("'{}' is not a directory", path.display())]
    #[diagnostic(
        code(gen_test_output::not_a_directory),
        help("pass the directory that holds the test inputs")
    )]
    NotADirectory { path: PathBuf },

    // Output errors: fatal at the iteration where they happen
    #[error("failed to create output file '{}'", path.display())]
    #[diagnostic(
        code(gen_test_output::create_output),
        help("outputs written earlier in this run are left on disk")
    )]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Process errors
    #[error("failed to spawn '{program}'")]
    #[diagnostic(
        code(gen_test_output::spawn),
        help("make sure the command is installed and on PATH, or pass --program")
    )]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for '{program}' to exit")]
    #[diagnostic(code(gen_test_output::wait))]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("run stopped at '{}': {reason}", input.display())]
    #[diagnostic(
        code(gen_test_output::aborted),
        help("drop --fail-fast to keep going past failing inputs")
    )]
    InvocationAborted { input: PathBuf, reason: String },

    // Configuration errors
    #[error("failed to read config file '{}'", path.display())]
    #[diagnostic(code(gen_test_output::config_read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}'", path.display())]
    #[diagnostic(
        code(gen_test_output::config_parse),
        help("known keys: test_dir, program, args, suffix, exclude_marker, failure_policy")
    )]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl GenError {
    /// True for errors that end the run before any process was started.
    pub fn is_enumeration_error(&self) -> bool {
        matches!(self, GenError::ReadDir { .. } | GenError::NotADirectory { .. })
    }
}
