//! Integration tests for the `pdfields` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use pdfields_core::test_support::pdf_with_pages;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pdfields").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn statement_folder(dir: &Path) {
    fs::write(
        dir.join("statement1.pdf"),
        pdf_with_pages(&[&["ACCOUNT 5XY-12345", "PAGE ONE"], &["BOUGHT", "100 SH XYZ CORP"]]),
    )
    .unwrap();
}

#[test]
fn wrong_arity_prints_usage() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .arg("only_input")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage :"))
        .stdout(predicate::str::contains("input is the folder"))
        .stderr(predicate::str::contains("expected 2 arguments, got 1"));
}

#[test]
fn missing_folder_fails() {
    let home = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    cmd(home.path())
        .current_dir(work.path())
        .args(["missing_folder", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory missing_folder could not be found"));

    assert!(!work.path().join("out").exists());
}

#[test]
fn converts_statement_folder() {
    let home = tempfile::tempdir().unwrap();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("results");
    statement_folder(input.path());

    cmd(home.path())
        .arg(input.path())
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 of 1 files"));

    let text = fs::read_to_string(out_dir.join("statement1.txt")).unwrap();
    assert!(text.ends_with("BOUGHT\n100 SH XYZ CORP\n\x0c"));
    assert_eq!(text.matches('\x0c').count(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("statement1.json")).unwrap()).unwrap();
    assert_eq!(json["page_count"], 2);
    assert_eq!(json["fields"]["cusip"]["status"], "pending");
    assert_eq!(json["fields"]["stock"]["values"], serde_json::json!(["100 SH XYZ CORP"]));
}

#[test]
fn relative_input_folder() {
    let home = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let statements = work.path().join("statements");
    fs::create_dir(&statements).unwrap();
    statement_folder(&statements);

    cmd(home.path())
        .current_dir(work.path())
        .args(["statements", "out", "--no-json"])
        .assert()
        .success();

    assert!(work.path().join("out").join("statement1.txt").exists());
    assert!(!work.path().join("out").join("statement1.json").exists());
}

#[test]
fn invalid_format_fails() {
    let home = tempfile::tempdir().unwrap();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    cmd(home.path())
        .arg(input.path())
        .arg(output.path())
        .args(["--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid format"));
}

#[test]
fn html_format_and_summary() {
    let home = tempfile::tempdir().unwrap();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    statement_folder(input.path());

    cmd(home.path())
        .arg(input.path())
        .arg(output.path())
        .args(["--format", "html", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary written to"));

    let html = fs::read_to_string(output.path().join("statement1.html")).unwrap();
    assert!(html.starts_with("<html>"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path().join("statement1.json")).unwrap()).unwrap();
    assert_eq!(json["fields"]["stock"]["values"], serde_json::json!(["100 SH XYZ CORP"]));

    let summary = fs::read_to_string(output.path().join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert!(lines.next().unwrap().starts_with("filename,pages,characters"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("statement1.pdf,2,"));
    assert!(row.contains("PENDING"));
}

#[test]
fn config_file_sets_format() {
    let home = tempfile::tempdir().unwrap();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    statement_folder(input.path());

    let config = home.path().join("custom.json");
    fs::write(&config, r#"{"pdf": {"format": "xml"}, "output": {"write_json": false}}"#).unwrap();

    cmd(home.path())
        .arg("--config")
        .arg(&config)
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success();

    assert!(output.path().join("statement1.xml").exists());
    assert!(!output.path().join("statement1.json").exists());
}

#[test]
fn bad_file_continue_on_error() {
    let home = tempfile::tempdir().unwrap();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    statement_folder(input.path());
    fs::write(input.path().join("broken.pdf"), b"not a pdf").unwrap();

    cmd(home.path())
        .arg(input.path())
        .arg(output.path())
        .assert()
        .failure();

    cmd(home.path())
        .arg(input.path())
        .arg(output.path())
        .arg("--continue-on-error")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("broken.pdf"));

    assert!(output.path().join("statement1.txt").exists());
}
