// Input discovery through the public library API.

mod common;

use std::fs;
use std::path::PathBuf;

use common::fixture;
use gen_test_output::{output_path_for, BatchRunner, GenError, InputDiscoverer, RunnerConfig};

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn discovery_skips_anything_named_like_an_output() {
    let dir = fixture(&[
        ("a.test", ""),
        ("a.test.out", ""),
        ("notes.out.txt", ""),
        ("b.k", ""),
    ]);

    let inputs = InputDiscoverer::discover_inputs(dir.path(), ".out").unwrap();

    assert_eq!(names(&inputs), vec!["a.test", "b.k"]);
}

#[test]
fn discovery_is_sorted_and_shallow() {
    let dir = fixture(&[("c.test", ""), ("a.test", ""), ("b.test", "")]);
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("d.test"), "").unwrap();

    let inputs = InputDiscoverer::discover_inputs(dir.path(), ".out").unwrap();

    assert_eq!(names(&inputs), vec!["a.test", "b.test", "c.test"]);
}

#[test]
fn discovery_of_missing_directory_is_an_enumeration_error() {
    let dir = fixture(&[]);

    let err = InputDiscoverer::discover_inputs(dir.path().join("gone"), ".out").unwrap_err();

    assert!(matches!(err, GenError::ReadDir { .. }));
    assert!(err.is_enumeration_error());
}

#[test]
fn plan_pairs_inputs_with_suffixed_outputs() {
    let dir = fixture(&[("a.test", "")]);
    let runner = BatchRunner::new(RunnerConfig::for_dir(dir.path()));

    let plan = runner.plan().unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].input, dir.path().join("a.test"));
    assert_eq!(plan[0].output, dir.path().join("a.test.out"));
    assert_eq!(plan[0].output, output_path_for(&plan[0].input, ".out"));
}

#[test]
fn custom_suffix_and_marker_are_honored() {
    let dir = fixture(&[("a.test", ""), ("a.test.golden", "")]);
    let mut config = RunnerConfig::for_dir(dir.path());
    config.suffix = ".golden".to_string();
    config.exclude_marker = ".golden".to_string();

    let plan = BatchRunner::new(config).plan().unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].output, dir.path().join("a.test.golden"));
}

#[cfg(unix)]
#[test]
fn discovery_follows_file_symlinks_and_drops_broken_ones() {
    use std::os::unix::fs::symlink;

    let dir = fixture(&[("a.test", "")]);
    let elsewhere = fixture(&[("real.test", "")]);
    symlink(elsewhere.path().join("real.test"), dir.path().join("linked.test")).unwrap();
    symlink(dir.path().join("missing"), dir.path().join("broken.test")).unwrap();
    symlink(elsewhere.path(), dir.path().join("dirlink")).unwrap();

    let inputs = InputDiscoverer::discover_inputs(dir.path(), ".out").unwrap();

    assert_eq!(names(&inputs), vec!["a.test", "linked.test"]);
}

#[cfg(unix)]
#[test]
fn library_run_with_real_process() {
    let dir = fixture(&[("a.test", "payload\n")]);
    let config = RunnerConfig::for_dir(dir.path()).with_command("cat", Vec::<String>::new());

    let summary = BatchRunner::new(config).run_all().unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.test.out")).unwrap(),
        "payload\n"
    );
}
