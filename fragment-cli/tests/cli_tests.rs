#![allow(clippy::unwrap_used)]
//! Integration tests for the `fragments` commands.
//!
//! These tests cover:
//! - `check` against a towncrier config and its fragment directory
//! - one report line per offending file and a failing result
//! - `--type` / `--dir` overrides without a config file
//! - JSON output
//! - `release-plan` output and version rejection

use std::fs;
use std::path::Path;

use clap::Parser;
use fragment_cli::cli::{Cli, run_with};
use tempfile::TempDir;

const PYPROJECT: &str = r#"
[tool.towncrier]
directory = "changelog.d"

[[tool.towncrier.type]]
directory = "fixed"
name = "Fixed"

[[tool.towncrier.type]]
directory = "added"
name = "Added"
"#;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), PYPROJECT).unwrap();
    fs::create_dir(tmp.path().join("changelog.d")).unwrap();
    fs::write(tmp.path().join("changelog.d").join(".gitkeep"), "").unwrap();
    tmp
}

fn fragment(root: &Path, name: &str, content: &str) {
    fs::write(root.join("changelog.d").join(name), content).unwrap();
}

fn run(args: &[&str]) -> (anyhow::Result<()>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = run_with(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_check_passes_on_valid_fragments() {
    let tmp = project();
    fragment(tmp.path(), "101.fixed.md", "Fix large file uploads.\n");
    fragment(tmp.path(), "+docs.added.md", "Add a quick start guide.\n");
    let config = tmp.path().join("pyproject.toml");

    let (result, out) = run(&["fragments", "check", "--config", config.to_str().unwrap()]);

    assert!(result.is_ok(), "unexpected error: {result:?}\n{out}");
    assert!(out.contains("Fragments checked:  2"), "got: {out}");
    assert!(out.contains("All 2 changelog fragments are valid"), "got: {out}");
}

#[test]
fn test_check_fails_and_reports_each_file() {
    let tmp = project();
    fragment(tmp.path(), "101.fixed.md", "Fix large file uploads.\n");
    fragment(tmp.path(), "102.removed.md", "Remove the v0 API.\n");
    fragment(tmp.path(), "103.fixed.md", "lowercase start\n");
    let config = tmp.path().join("pyproject.toml");

    let (result, out) = run(&["fragments", "check", "--config", config.to_str().unwrap()]);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Found errors"), "got: {err}");
    assert!(
        out.contains("File 102.removed.md doesn't match the expected pattern: Change type 'removed'"),
        "got: {out}"
    );
    assert!(
        out.contains("File 103.fixed.md is not a valid changelog entry:"),
        "got: {out}"
    );
    assert!(!out.contains("File 101.fixed.md"), "got: {out}");
    assert!(out.contains("2 of 3 changelog fragments are invalid"), "got: {out}");
}

#[test]
fn test_check_with_explicit_types_and_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("7.security.md"), "Patch a token leak.").unwrap();
    let missing_config = tmp.path().join("pyproject.toml");

    let (result, out) = run(&[
        "fragments",
        "check",
        "--config",
        missing_config.to_str().unwrap(),
        "--dir",
        tmp.path().to_str().unwrap(),
        "--type",
        "security",
    ]);

    assert!(result.is_ok(), "unexpected error: {result:?}\n{out}");
}

#[test]
fn test_check_json_output() {
    let tmp = project();
    fragment(tmp.path(), "abc.fixed.md", "Bad description.");
    let config = tmp.path().join("pyproject.toml");

    let (result, out) = run(&[
        "fragments",
        "check",
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert!(result.is_err());
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(value["skipped_files"], 1);
    assert_eq!(value["failures"][0]["file"], "abc.fixed.md");
    assert_eq!(value["failures"][0]["issues"][0]["kind"], "bad_description");
}

#[test]
fn test_check_missing_directory_errors() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), PYPROJECT).unwrap();
    let config = tmp.path().join("pyproject.toml");

    let (result, _) = run(&["fragments", "check", "--config", config.to_str().unwrap()]);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("does not exist"), "got: {err}");
}

#[test]
fn test_release_plan_prints_steps() {
    let (result, out) = run(&["fragments", "release-plan", "3.1.0"]);

    assert!(result.is_ok());
    assert!(out.contains("towncrier build --yes --version 3.1.0"));
    assert!(out.contains("git commit -m \"release 3.1.0\""));
    assert!(out.contains("git tag v3.1.0"));
}

#[test]
fn test_release_plan_rejects_prefixed_version() {
    let (result, out) = run(&["fragments", "release-plan", "v3.1.0"]);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("X.Y.Z"), "got: {err}");
    assert!(out.is_empty());
}
