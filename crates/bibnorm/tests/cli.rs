//! Binary tests: argument handling, stdin/stdout defaults, exit status

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bibnorm"))
}

const SAMPLE: &str = r#"
@article{Smith2024,
    title = {DEEP LEARNING},
    year = {2024},
}
"#;

/// No arguments: stdin to stdout.
#[test]
fn test_cli_stdin_to_stdout() {
    cmd()
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("title = {Deep learning},"));
}

/// Input path argument, output still on stdout.
#[test]
fn test_cli_input_file_to_stdout() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(SAMPLE.as_bytes()).unwrap();

    cmd()
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("@article{Smith2024,"))
        .stdout(predicate::str::contains("title = {Deep learning},"));
}

/// Both positional arguments: file to file, nothing on stdout.
#[test]
fn test_cli_input_and_output_files() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(SAMPLE.as_bytes()).unwrap();
    let output = NamedTempFile::new().unwrap();

    cmd()
        .args([input.path(), output.path()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert!(written.contains("title = {Deep learning},"));
    assert!(written.contains("year = 2024,"));
}

/// Malformed input fails with a nonzero exit and a line number.
#[test]
fn test_cli_parse_error_exits_nonzero() {
    cmd()
        .write_stdin("@article{Broken, title = {unclosed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line"));
}

/// Missing input file fails.
#[test]
fn test_cli_missing_input_file() {
    cmd().arg("no/such/file.bib").assert().failure();
}

/// Protected titles pass through the whole pipeline untouched.
#[test]
fn test_cli_protected_title_round_trip() {
    cmd()
        .write_stdin("@article{K, title = {A Title {With Acronym} Here}}")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "title = {A Title {With Acronym} Here},",
        ));
}
