//! Tests for the GitHub Action entry point.

use crate::support::*;

#[test]
fn test_action_rollback_mode_requires_version() {
    let t = Test::new();

    let output = t.action(&[("container", CONTAINER), ("rollback-mode", "true")]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required input: rollback-version");
}

#[test]
fn test_action_false_rollback_mode_deploys() {
    let t = Test::new();

    let output = t.action(&[("container", CONTAINER), ("rollback-mode", "false")]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required input: source-directory");
}

#[test]
fn test_action_blank_inputs_use_defaults() {
    let t = Test::new();
    t.build("dist", BUILD_V3);
    t.config(MISSING_TOOLS_CONFIG);

    let output = t.action(&[
        ("container", CONTAINER),
        ("source-directory", "dist"),
        ("region", ""),
        ("environment", ""),
        ("rollback-mode", ""),
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "required tool not found");
}

#[test]
fn test_action_annotates_errors() {
    let t = Test::new();

    let output = t
        .cmd()
        .arg("action")
        .env("GITHUB_ACTIONS", "true")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stdout_contains(&output, "::error::missing required input: container");
}

#[test]
fn test_action_accepts_branch_name_and_app_name() {
    let t = Test::new();
    t.build("dist", BUILD_V3);
    t.config(MISSING_TOOLS_CONFIG);

    let output = t.action(&[
        ("container", CONTAINER),
        ("source-directory", "dist"),
        ("version-deployment", "true"),
        ("branch-name", "main"),
        ("app-name", "checkout"),
    ]);
    assert_failure(&output);
    let err = stderr(&output);
    assert!(!err.contains("branch name is required"), "got: {}", err);
    assert_stderr_contains(&output, "required tool not found");
}

#[test]
fn test_action_rejects_bad_app_name() {
    let t = Test::new();
    t.build("dist", BUILD_V3);

    let output = t.action(&[
        ("container", CONTAINER),
        ("source-directory", "dist"),
        ("version-deployment", "true"),
        ("branch-name", "main"),
        ("app-name", "check out"),
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid microfrontend label 'check out'");
}
