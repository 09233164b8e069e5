//! Runner configuration.
//!
//! Defaults reproduce the historical behavior: walk `tests/`, skip anything
//! whose name contains `.out`, run `krun --search <file>` and write
//! `<file>.out`. A YAML file can override any of them, and the CLI overrides
//! the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{GenError, GenResult};

pub const DEFAULT_TEST_DIR: &str = "tests";
pub const DEFAULT_PROGRAM: &str = "krun";
pub const DEFAULT_SEARCH_FLAG: &str = "--search";
pub const DEFAULT_SUFFIX: &str = ".out";

/// What to do after an invocation fails or cannot be spawned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure and move on to the next input.
    #[default]
    Continue,
    /// Stop the run after the first failing input.
    FailFast,
}

/// Everything a batch run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    pub test_dir: PathBuf,
    pub program: String,
    /// Arguments placed before the input path.
    pub args: Vec<String>,
    /// Appended to the full input file name to form the output path.
    pub suffix: String,
    /// Files whose name contains this are treated as prior outputs.
    pub exclude_marker: String,
    pub failure_policy: FailurePolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            program: DEFAULT_PROGRAM.to_string(),
            args: vec![DEFAULT_SEARCH_FLAG.to_string()],
            suffix: DEFAULT_SUFFIX.to_string(),
            exclude_marker: DEFAULT_SUFFIX.to_string(),
            failure_policy: FailurePolicy::Continue,
        }
    }
}

impl RunnerConfig {
    /// Default configuration pointed at `test_dir`.
    pub fn for_dir(test_dir: impl Into<PathBuf>) -> Self {
        Self {
            test_dir: test_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_command<I, S>(mut self, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Loads a YAML config file. Missing keys fall back to the defaults.
    pub fn from_yaml_file(path: &Path) -> GenResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| GenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&source).map_err(|source| GenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a map
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_historical_behavior() {
        let config = RunnerConfig::default();
        assert_eq!(config.test_dir, PathBuf::from("tests"));
        assert_eq!(config.program, "krun");
        assert_eq!(config.args, vec!["--search".to_string()]);
        assert_eq!(config.suffix, ".out");
        assert_eq!(config.exclude_marker, ".out");
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RunnerConfig::from_yaml_str("program: cat\nargs: []\n").unwrap();
        assert_eq!(config.program, "cat");
        assert!(config.args.is_empty());
        assert_eq!(config.test_dir, PathBuf::from("tests"));
        assert_eq!(config.suffix, ".out");
    }

    #[test]
    fn test_failure_policy_is_kebab_case() {
        let config = RunnerConfig::from_yaml_str("failure_policy: fail-fast").unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RunnerConfig::from_yaml_str("").unwrap(), RunnerConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(RunnerConfig::from_yaml_str("programme: krun").is_err());
    }
}
