use std::fs;

use predicates::prelude::predicate;
use tempfile::tempdir;

#[test]
fn check_reports_canonical_input_with_exit_zero() {
    assert_cmd::cargo::cargo_bin_cmd!("schemafmt")
        .args(["check", "--from", "json"])
        .write_stdin(r#"{"a":1,"b":2}"#)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""canonical":true"#));
}

#[test]
fn check_reports_unordered_input_with_exit_two() {
    assert_cmd::cargo::cargo_bin_cmd!("schemafmt")
        .args(["check", "--from", "json"])
        .write_stdin(r#"{"b":2,"a":1}"#)
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""mismatch_count":1"#))
        .stdout(predicate::str::contains(r#""path":"$[0]""#));
}

#[test]
fn check_accepts_schema_order_as_canonical() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("t.json"),
        r#"{"$id": "./t.json", "properties": {"$schema": {}, "second": {}, "first": {}}}"#,
    )
    .expect("write schema");

    assert_cmd::cargo::cargo_bin_cmd!("schemafmt")
        .args(["check", "--from", "json", "--schemas"])
        .arg(dir.path())
        .write_stdin(r#"{"$schema":"./t.json","second":2,"first":1}"#)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""canonical":true"#));
}

#[test]
fn check_reads_input_files_by_extension() {
    let dir = tempdir().expect("tempdir");
    let data_path = dir.path().join("rows.jsonl");
    fs::write(&data_path, "{\"a\":1}\n{\"b\":2,\"a\":1}\n").expect("write data file");

    assert_cmd::cargo::cargo_bin_cmd!("schemafmt")
        .args(["check", "--input"])
        .arg(&data_path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""path":"$[1]""#));
}

#[test]
fn check_missing_input_file_is_a_usage_error() {
    assert_cmd::cargo::cargo_bin_cmd!("schemafmt")
        .args(["check", "--input", "/nonexistent/data.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input_usage_error"));
}
