//! Tests for help, version and error handling.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
    assert_stdout_contains(&output, "deploy");
    assert_stdout_contains(&output, "rollback");
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_malformed_config_is_reported() {
    let t = Test::new();
    t.config("[deploy\n");

    let output = t.rollback(&["--container", CONTAINER, "--rollback-version", "1"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_account_ignores_malformed_config() {
    let t = Test::new();
    t.config("[deploy\n");

    let output = t.account(&[]);
    assert_success(&output);
}
