// CLI integration tests for sample/get/fmt flows.
use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_dyndoc");
    Command::new(exe)
}

fn parse_json(output: &[u8]) -> Value {
    let text = std::str::from_utf8(output).expect("utf8");
    serde_json::from_str(text.trim()).expect("valid json")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("output")
}

#[test]
fn sample_prints_person_document() {
    let output = cmd().arg("sample").output().expect("sample");
    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    assert_eq!(value["first name"], "иван");
    assert_eq!(value["address"]["postalCode"], 101101);
    assert_eq!(value["phoneNumbers"], json!(["812 123-1234", "916 123-4567"]));
}

#[test]
fn get_reads_typed_values_from_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("doc.json");
    std::fs::write(&path, r#"{"age":" 42 ","tags":"x","address":{"city":"X"}}"#)
        .expect("write doc");
    let file = path.to_str().expect("path");

    let age = cmd()
        .args(["get", "age", "--as", "int", "--file", file])
        .output()
        .expect("get age");
    assert!(age.status.success());
    assert_eq!(parse_json(&age.stdout), json!(42));

    let tags = cmd()
        .args(["get", "tags", "--as", "list", "--file", file])
        .output()
        .expect("get tags");
    assert!(tags.status.success());
    assert_eq!(parse_json(&tags.stdout), json!(["x"]));

    let address = cmd()
        .args(["get", "address", "--as", "object", "--file", file])
        .output()
        .expect("get address");
    assert!(address.status.success());
    assert_eq!(parse_json(&address.stdout), json!({"city": "X"}));

    let missing = cmd()
        .args(["get", "missing", "--as", "long", "--default", "7", "--file", file])
        .output()
        .expect("get missing");
    assert!(missing.status.success());
    assert_eq!(parse_json(&missing.stdout), json!(7));
}

#[test]
fn get_reports_type_mismatch_as_json_error() {
    let output = run_with_stdin(&["get", "age", "--as", "int"], r#"{"age":"abc"}"#);
    assert_eq!(output.status.code(), Some(6));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "TypeMismatch");
    assert_eq!(err["error"]["key"], "age");
}

#[test]
fn null_list_default_is_invalid_argument() {
    let output = run_with_stdin(&["get", "tags", "--as", "list", "--default", "null"], "{}");
    assert_eq!(output.status.code(), Some(3));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "InvalidArgument");
}

#[test]
fn malformed_input_is_decode_error() {
    let output = run_with_stdin(&["fmt"], r#"{"a":"#);
    assert_eq!(output.status.code(), Some(4));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Decode");
    let hint = err["error"]["hint"].as_str().expect("hint");
    assert!(hint.contains("context: stdin"));
}

#[test]
fn fmt_drops_nulls_and_keeps_order() {
    let output = run_with_stdin(&["fmt"], r#"{ "z": 1, "gone": null, "a": [1, 2] }"#);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(text.trim(), r#"{"z":1,"a":[1,2]}"#);
}

#[test]
fn unknown_flags_are_usage_errors() {
    let output = cmd().args(["sample", "--bogus"]).output().expect("run");
    assert_eq!(output.status.code(), Some(2));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
}
