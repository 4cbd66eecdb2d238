//! Tests for deploy input validation and tool discovery.

use crate::support::*;

#[test]
fn test_deploy_requires_container() {
    let t = Test::new();
    t.build("dist", BUILD_V3);

    let output = t.deploy(&["--source-directory", "dist"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required input: container");
}

#[test]
fn test_deploy_requires_source_directory() {
    let t = Test::new();

    let output = t.deploy(&["--container", CONTAINER]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required input: source-directory");
}

#[test]
fn test_deploy_missing_source_directory() {
    let t = Test::new();

    let output = t.deploy(&["--container", CONTAINER, "--source-directory", "dist"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "source directory not found");
}

#[test]
fn test_deploy_container_must_match_repository() {
    let t = Test::new();
    t.build("dist", BUILD_V3);

    let output = t
        .cmd()
        .args(["deploy", "--container", "search", "--source-directory", "dist"])
        .env("GITHUB_REPOSITORY", "acme/checkout")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "does not match repository 'acme/checkout'");
    assert_stdout_contains(&output, "named after the repository");
}

#[test]
fn test_deploy_versioned_requires_branch() {
    let t = Test::new();
    t.build("dist", BUILD_V3);

    let output = t.deploy(&[
        "--container",
        CONTAINER,
        "--source-directory",
        "dist",
        "--version-deployment",
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "branch name is required");
}

#[test]
fn test_deploy_missing_tools() {
    let t = Test::new();
    t.build("dist", BUILD_V3);
    t.config(MISSING_TOOLS_CONFIG);

    let output = t.deploy(&["--container", CONTAINER, "--source-directory", "dist"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "required tool not found");
    assert_stderr_contains(&output, "mfdeploy-missing-az");
}

#[test]
fn test_deploy_explicit_config_must_exist() {
    let t = Test::new();
    t.build("dist", BUILD_V3);

    let output = t.deploy(&[
        "--config",
        "nowhere.toml",
        "--container",
        CONTAINER,
        "--source-directory",
        "dist",
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read config file");
}

#[cfg(unix)]
#[test]
fn test_deploy_without_any_account_fails() {
    let t = Test::new();
    t.build("dist", BUILD_V3);
    let az = stub_tool(&t, "az", 1);
    let azcopy = stub_tool(&t, "azcopy", 0);
    t.config(&format!(
        "[tools]\naz = \"{}\"\nazcopy = \"{}\"\n",
        az.display(),
        azcopy.display()
    ));

    let output = t.deploy(&[
        "--container",
        CONTAINER,
        "--source-directory",
        "dist",
        "--region",
        "eastus",
    ]);
    assert_failure(&output);
    assert_stdout_contains(&output, "skipped eastus");
    assert_stderr_contains(&output, "no region accepted the deployment");
}

/// Executable that ignores its arguments and exits with `code`.
#[cfg(unix)]
fn stub_tool(t: &Test, name: &str, code: i32) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = t.dir.path().join("bin").join(name);
    write_file(&path, &format!("#!/bin/sh\nexit {}\n", code));
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
