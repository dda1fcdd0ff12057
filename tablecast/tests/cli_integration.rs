//! Integration tests for tablecast CLI

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{tempdir, TempDir};

const PEOPLE: &str = r#"{
    "title": "People",
    "classes": ["wide"],
    "attrs": {"id": "people"},
    "headers": ["Name", {"cell": "Age", "classes": ["num"]}],
    "rows": [
        {"cells": ["Ann", 30], "pk": 7, "classes": ["hl"]},
        ["Bo", null]
    ],
    "buttons": [{"type": "button", "content": "Export", "url": "/people.csv"}],
    "js": "init();"
}"#;

fn run_tablecast(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-q", "-p", "tablecast", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write_doc(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_tablecast(&["--help"]);

    assert!(success);
    assert!(stdout.contains("tablecast"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_render_help_lists_flags() {
    let (stdout, _, success) = run_tablecast(&["render", "--help"]);

    assert!(success);
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--options"));
    assert!(stdout.contains("--timezone"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_tablecast(&["--version"]);

    assert!(success);
    assert!(stdout.contains("tablecast"));
}

#[test]
fn test_render_html() {
    let dir = tempdir().unwrap();
    let input = write_doc(&dir, "people.json", PEOPLE);
    let (stdout, _, success) = run_tablecast(&["render", arg(&input)]);

    assert!(success);
    assert!(stdout.starts_with("<h3>People</h3>\n<table class=\"wide results\" id=\"people\">"));
    assert!(stdout.contains("<th class=\"num\">Age</th>"));
    assert!(stdout.contains("    <tr class=\"hl row1\" data-pk=\"7\">"));
    assert!(stdout.contains("    <tr class=\"row2\">"));
    assert!(stdout.contains("<td>&nbsp;</td>"));
    assert!(stdout.contains(
        "<div class=\"post-table-buttons\"><a href=\"/people.csv\" class=\"button\">Export</a></div>"
    ));
    assert!(stdout.contains("<script>init();</script>"));
}

#[test]
fn test_render_csv_to_stdout() {
    let dir = tempdir().unwrap();
    let input = write_doc(&dir, "people.json", PEOPLE);
    let (stdout, _, success) = run_tablecast(&["render", arg(&input), "--format", "csv"]);

    assert!(success);
    assert_eq!(stdout, "Name,Age\nAnn,30\nBo,\n");
}

#[test]
fn test_render_csv_to_file() {
    let dir = tempdir().unwrap();
    let input = write_doc(&dir, "people.json", PEOPLE);
    let output = dir.path().join("people.csv");
    let (stdout, _, success) = run_tablecast(&[
        "render",
        arg(&input),
        "--format",
        "csv",
        "--output",
        arg(&output),
    ]);

    assert!(success);
    assert!(stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Name,Age\nAnn,30\nBo,\n"
    );
}

#[test]
fn test_timezone_flag() {
    let dir = tempdir().unwrap();
    let input = write_doc(
        &dir,
        "events.json",
        r#"{"headers": ["At"], "rows": [[{"type": "datetime", "value": "2024-01-15T12:00:00Z"}]]}"#,
    );

    let (stdout, _, success) = run_tablecast(&[
        "render",
        arg(&input),
        "--timezone",
        "America/New_York",
    ]);
    assert!(success);
    assert!(stdout.contains("<td>Jan 15, 2024 7:00 AM</td>"));

    let (stdout, _, success) = run_tablecast(&[
        "render",
        arg(&input),
        "--format",
        "csv",
        "--timezone",
        "America/New_York",
    ]);
    assert!(success);
    assert_eq!(stdout, "At\n2024-01-15T07:00:00-05:00\n");
}

#[test]
fn test_options_file() {
    let dir = tempdir().unwrap();
    let input = write_doc(
        &dir,
        "days.json",
        r#"{"headers": ["Day"], "rows": [[{"type": "date", "value": "2024-03-09"}]]}"#,
    );
    let options = write_doc(&dir, "options.json", r#"{"date_format": "%d.%m.%Y"}"#);

    let (stdout, _, success) =
        run_tablecast(&["render", arg(&input), "--options", arg(&options)]);
    assert!(success);
    assert!(stdout.contains("<td>09.03.2024</td>"));
}

#[test]
fn test_unknown_timezone_fails() {
    let dir = tempdir().unwrap();
    let input = write_doc(&dir, "people.json", PEOPLE);
    let (_, stderr, success) =
        run_tablecast(&["render", arg(&input), "--timezone", "Mars/Olympus"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("Mars/Olympus"));
}

#[test]
fn test_unsupported_value_fails() {
    let dir = tempdir().unwrap();
    let input = write_doc(
        &dir,
        "bad.json",
        r#"{"headers": ["A"], "rows": [[{"nested": true}]]}"#,
    );
    let (stdout, stderr, success) = run_tablecast(&["render", arg(&input)]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("row 0: cell 0"));
    assert!(stderr.contains("cannot turn a value of type `object` into cell content"));
}

#[test]
fn test_missing_input_fails() {
    let (_, stderr, success) = run_tablecast(&["render", "/nonexistent/table.json"]);

    assert!(!success);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_inspect() {
    let dir = tempdir().unwrap();
    let input = write_doc(&dir, "people.json", PEOPLE);
    let (stdout, _, success) = run_tablecast(&["inspect", arg(&input)]);

    assert!(success);
    assert!(stdout.contains("headers [\"Name\", Cell(\"Age\", classes=[\"num\"], is_header=true)]"));
    assert!(stdout.contains("Row(\"Ann\", 30, classes=[\"hl\"], data-pk='7')"));
    assert!(stdout.contains("Row(\"Bo\", None)"));
}
