//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Creates a temporary test directory holding `files` as `(name, contents)`.
pub fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write fixture file");
    }
    dir
}

/// The CLI binary, with `RUST_LOG` cleared so log noise never reaches stderr.
pub fn cli() -> Command {
    let mut cmd = Command::cargo_bin("gen-test-output").expect("binary is built");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Sorted file names directly under `dir`.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read fixture dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output file")
}
