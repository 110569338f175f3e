//! End-to-end tests for the docusaurus-compat CLI
//!
//! These tests verify:
//! - Rewrite mode changes package.json (and dry-run does not)
//! - List mode publishes the step output
//! - Failures are reported with the right channel and exit code
//! - The post phase restores the workspace

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const SITE: &str = r#"{
  "name": "my-site",
  "version": "0.0.0",
  "dependencies": {
    "@docusaurus/core": "^2.4.3",
    "@docusaurus/preset-classic": "2.4.3",
    "react": "^18.2.0"
  },
  "devDependencies": {
    "@docusaurus/module-type-aliases": "~2.4.3",
    "@tsconfig/docusaurus": "^1.0.7"
  }
}
"#;

/// The binary with the CI environment cleared
fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docusaurus-compat"));
    cmd.env_remove("GITHUB_ACTIONS")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("DOCUSAURUS_COMPAT_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Create a test directory holding a Docusaurus site manifest
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("package.json"), SITE).unwrap();
    temp_dir
}

fn read_package_json(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("package.json")).unwrap()
}

#[test]
fn test_rewrite_pins_framework_packages() {
    let project = create_test_project();

    cli()
        .args(["3.1.0", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 package(s) pinned to 3.1.0"));

    let expected = SITE
        .replace("\"^2.4.3\"", "\"^3.1.0\"")
        .replace("\"2.4.3\"", "\"3.1.0\"")
        .replace("\"~2.4.3\"", "\"~3.1.0\"");
    assert_eq!(read_package_json(&project), expected);
}

#[test]
fn test_dry_run_leaves_file_unchanged() {
    let project = create_test_project();

    cli()
        .args(["3.1.0", "--dry-run", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry-run)"));

    assert_eq!(read_package_json(&project), SITE);
}

#[test]
fn test_json_output() {
    let project = create_test_project();

    let output = cli()
        .args(["3.1.0", "--json", "-n", "-C"])
        .arg(project.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mode"], "test");
    assert_eq!(value["target_version"], "3.1.0");
    assert_eq!(value["modified"], false);
    assert_eq!(value["rewrites"], 3);
}

#[test]
fn test_diff_output() {
    let project = create_test_project();

    cli()
        .args(["3.1.0", "--diff", "-n", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "+    \"@docusaurus/core\": \"^3.1.0\"",
        ));
}

#[test]
fn test_missing_mode_fails() {
    cli()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: either a VERSION or --setup-versions is required",
        ));
}

#[test]
fn test_missing_manifest_fails() {
    let empty = tempfile::tempdir().unwrap();
    let manifest = empty.path().join("package.json");

    cli()
        .args(["3.1.0", "--manifest"])
        .arg(&manifest)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not find package.json"));
}

#[test]
fn test_failure_annotation_in_github_actions() {
    cli()
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "::error::either a VERSION or --setup-versions is required",
        ));
}

#[test]
fn test_setup_versions_writes_step_output() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/versions.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"["2.0.0","1.14.0"]"#)
        .create();
    let url = format!("{}/versions.json", server.url());
    let dir = tempfile::tempdir().unwrap();
    let github_output = dir.path().join("github_output");

    cli()
        .args(["--setup-versions", "--versions-url", &url, "-C"])
        .arg(dir.path())
        .env("GITHUB_OUTPUT", &github_output)
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"1.14.0\""));

    mock.assert();
    assert_eq!(
        fs::read_to_string(&github_output).unwrap(),
        "docusaurus-versions=[\"2.0.0\",\"1.14.0\"]\n"
    );
}

#[test]
fn test_setup_versions_feed_error_fails() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/versions.json")
        .with_status(503)
        .create();
    let url = format!("{}/versions.json", server.url());
    let dir = tempfile::tempdir().unwrap();
    let github_output = dir.path().join("github_output");

    cli()
        .args(["--setup-versions", "--versions-url", &url, "-C"])
        .arg(dir.path())
        .env("GITHUB_OUTPUT", &github_output)
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("HTTP 503"));

    mock.assert();
    assert!(!github_output.exists());
}

#[test]
fn test_post_phase_without_snapshot() {
    let project = create_test_project();

    cli()
        .args(["--phase", "post", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No snapshot to restore"));
}

#[cfg(unix)]
#[test]
fn test_passing_run_then_restore() {
    let project = create_test_project();

    // `true install` and `true test` both exit 0
    cli()
        .args(["3.1.0", "--test", "--package-manager", "true", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ true test"));
    assert!(read_package_json(&project).contains("^3.1.0"));

    cli()
        .args(["--phase", "post", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored"));
    assert_eq!(read_package_json(&project), SITE);
}

#[cfg(unix)]
#[test]
fn test_failing_install_reports_version() {
    let project = create_test_project();

    cli()
        .args(["3.1.0", "--test", "--package-manager", "false", "-C"])
        .arg(project.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Install failed for Docusaurus version 3.1.0",
        ));
}

#[cfg(unix)]
#[test]
fn test_failing_tests_report_version() {
    use std::os::unix::fs::PermissionsExt;

    let project = create_test_project();
    let script = project.path().join("fake-pm.sh");
    fs::write(
        &script,
        "#!/bin/sh\nif [ \"$1\" = \"test\" ]; then echo 'tests broke' >&2; exit 3; fi\nexit 0\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    cli()
        .args(["3.1.0", "--test", "--package-manager"])
        .arg(&script)
        .arg("-C")
        .arg(project.path())
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("✗"))
        .stdout(predicate::str::contains("tests broke"))
        .stdout(predicate::str::contains(
            "::error::Tests failed for Docusaurus version 3.1.0",
        ));
}
