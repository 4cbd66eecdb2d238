//! Tests for rollback input validation.

use crate::support::*;

#[test]
fn test_rollback_requires_version() {
    let t = Test::new();

    let output = t.rollback(&["--container", CONTAINER]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required input: rollback-version");
}

#[test]
fn test_rollback_rejects_non_numeric_version() {
    let t = Test::new();

    let output = t.rollback(&["--container", CONTAINER, "--rollback-version", "latest"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid rollback version 'latest'");
}

#[test]
fn test_rollback_rejects_zero() {
    let t = Test::new();

    let output = t.rollback(&["--container", CONTAINER, "--rollback-version", "0"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid rollback version '0'");
}

#[test]
fn test_rollback_validates_before_tools() {
    let t = Test::new();
    t.config(MISSING_TOOLS_CONFIG);

    let output = t.rollback(&[
        "--container",
        CONTAINER,
        "--rollback-version",
        "3",
        "--environment",
        "qa",
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown environment 'qa'");
}

#[test]
fn test_rollback_missing_tools() {
    let t = Test::new();
    t.config(MISSING_TOOLS_CONFIG);

    let output = t.rollback(&["--container", CONTAINER, "--rollback-version", "3"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "required tool not found");
}
