//! Integration tests for the heaudit command
//!
//! Tests cover:
//! - Rendering results through the library entry point
//! - Exit status and stdout of the built binary
//!
//! Spawned processes get their own `HEAUDIT_CONFIG`, so nothing here touches
//! the test process environment.

use std::process::{Command, Output};

use heaudit_cli::{exit_code, run, BuildInfo, EXIT_BAD_INPUT, EXIT_FAILURE};
use heaudit_common::{Validator, ValidatorConfig};
use serde_json::Value;

fn heaudit(arg: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heaudit"))
        .arg(arg)
        .env("HEAUDIT_CONFIG", "/nonexistent/heaudit.toml")
        .env_remove("RUST_LOG")
        .output()
        .expect("heaudit binary runs")
}

#[test]
fn test_run_renders_buckets_in_order() {
    let output = run(&Validator::new(ValidatorConfig::default()), r#"{"zip_code": "9472"}"#).unwrap();
    let blocker = output.find("\"blocker\"").unwrap();
    let error = output.find("\"error\"").unwrap();
    let mandatory = output.find("\"mandatory\"").unwrap();
    assert!(blocker < error && error < mandatory);

    let value: Value = serde_json::from_str(&output).unwrap();
    assert!(value["blocker"]["zip_code"].is_string());
    assert_eq!(value["mandatory"]["year_built"], "year_built is required");
}

#[test]
fn test_run_nested_lists_messages() {
    let output = run(
        &Validator::new(ValidatorConfig::default()),
        r#"{"about": {"year_built": "old"}}"#,
    )
    .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value["blocker"]["/about/year_built"],
        serde_json::json!(["year_built must be of type integer"])
    );
    assert_eq!(value["mandatory"]["/about/zip_code"], "'zip_code' is a required property");
}

#[test]
fn test_run_rejects_bad_json() {
    let err = run(&Validator::default(), "{zip_code").unwrap_err();
    assert_eq!(err.to_string(), "Record argument is not valid JSON");
    assert_eq!(exit_code(&err), EXIT_BAD_INPUT);
}

#[test]
fn test_other_failures_are_not_bad_input() {
    let err = anyhow::anyhow!("stdout closed").context("Failed to render the validation result");
    assert_eq!(exit_code(&err), EXIT_FAILURE);
}

#[test]
fn test_build_info_display() {
    let info = BuildInfo::current();
    let text = info.to_string();
    assert!(text.starts_with("heaudit v"));
    assert!(text.contains(info.git_hash));
    assert!(!info.git_hash.is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(info.build_timestamp).is_ok());
}

#[test]
fn test_binary_exits_zero_with_violations() {
    let output = heaudit(r#"{"year_built": 1200}"#);
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["blocker"]["year_built"].is_string());
}

#[test]
fn test_binary_non_object_record() {
    let output = heaudit("[1, 2]");
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["blocker"]["/"], serde_json::json!(["record must be of type object (found array)"]));
}

#[test]
fn test_binary_bad_json_exits_two() {
    let output = heaudit("not json");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not valid JSON"));
}
