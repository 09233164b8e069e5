use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{GenError, GenResult};

/// An input file paired with the output path its captured stdout goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInvocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Finds the inputs of a batch run.
///
/// Discovery follows this flow:
/// 1. List the direct entries of the test directory (no recursion)
/// 2. Keep regular files, following symlinks the way `stat` does
/// 3. Drop files whose name contains the exclusion marker, or ends with the
///    output suffix when planning a run
/// 4. Sort what is left so runs are deterministic
#[derive(Debug)]
pub struct InputDiscoverer;

impl InputDiscoverer {
    // =====================
    // Public API
    // =====================

    /// Lists the input files directly under `dir`.
    ///
    /// Fails before anything is returned if `dir` is missing, unreadable, or
    /// not a directory.
    pub fn discover_inputs<P: AsRef<Path>>(dir: P, marker: &str) -> GenResult<Vec<PathBuf>> {
        Self::collect_inputs(dir.as_ref(), marker, None)
    }

    /// Discovers inputs and pairs each one with its output path.
    ///
    /// Files already named like an output (ending with `suffix`) are never
    /// inputs, even when the marker differs, so repeated runs do not stack
    /// suffixes.
    pub fn plan<P: AsRef<Path>>(
        dir: P,
        marker: &str,
        suffix: &str,
    ) -> GenResult<Vec<PlannedInvocation>> {
        let inputs = Self::collect_inputs(dir.as_ref(), marker, Some(suffix))?;
        Ok(inputs
            .into_iter()
            .map(|input| PlannedInvocation {
                output: output_path_for(&input, suffix),
                input,
            })
            .collect())
    }

    // =====================
    // Internal - Enumeration
    // =====================

    fn collect_inputs(dir: &Path, marker: &str, suffix: Option<&str>) -> GenResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| GenError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;

            let path = entry.path();
            if !Self::is_regular_file(&entry) {
                debug!(path = %path.display(), "skipping non-file entry");
                continue;
            }
            if Self::is_marked_output(path, marker)
                || suffix.is_some_and(|suffix| Self::has_output_suffix(path, suffix))
            {
                debug!(path = %path.display(), "skipping prior output");
                continue;
            }

            files.push(path.to_path_buf());
        }

        // walkdir yields nothing for a plain file root once depth 0 is filtered
        if files.is_empty() && !dir.is_dir() {
            return Err(GenError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        files.sort();
        debug!(dir = %dir.display(), count = files.len(), "discovered inputs");
        Ok(files)
    }

    // =====================
    // Internal - File System Utilities
    // =====================

    fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            // Broken links are not files
            return fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file());
        }
        file_type.is_file()
    }

    /// Returns true if the file name contains `marker` anywhere, not just as an
    /// extension (`a.out.txt` is excluded too).
    fn is_marked_output(path: &Path, marker: &str) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().contains(marker))
    }

    /// An empty suffix names no output.
    fn has_output_suffix(path: &Path, suffix: &str) -> bool {
        !suffix.is_empty()
            && path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
    }
}

/// Appends `suffix` to the full file name: `tests/a.test` becomes
/// `tests/a.test.out`. The extension is never replaced.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = input.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}
