//! Integration tests for the CLI surface

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_formats_command() {
    let mut cmd = Command::cargo_bin("domainforge").unwrap();

    cmd.arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("openapi"))
        .stdout(predicate::str::contains("protobuf"));
}

#[test]
fn test_generate_dry_run() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("domainforge").unwrap();

    cmd.arg("generate")
        .arg("--spec")
        .arg(fixture("user_service.yaml"))
        .arg("--output")
        .arg(out.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"))
        .stdout(predicate::str::contains("domain/user.go"));

    assert!(!out.path().join("domain").exists());
}

#[test]
fn test_generate_writes_project() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("domainforge").unwrap();

    cmd.arg("generate")
        .arg("--spec")
        .arg(fixture("catalog.proto"))
        .arg("--output")
        .arg(out.path())
        .arg("--module")
        .arg("github.com/demo/catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(out.path().join("domain/product.go").is_file());
    let go_mod = std::fs::read_to_string(out.path().join("go.mod")).unwrap();
    assert!(go_mod.contains("github.com/demo/catalog"));
}

#[test]
fn test_scaffold_command() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("domainforge").unwrap();

    cmd.arg("scaffold")
        .arg("--project-name")
        .arg("demo")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success();

    for path in ["go.mod", "Makefile", "README.md", "config.yaml", "cmd/main.go"] {
        assert!(out.path().join(path).is_file(), "missing {path}");
    }
}

#[test]
fn test_generate_rejects_missing_spec() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("domainforge").unwrap();

    cmd.arg("generate")
        .arg("--spec")
        .arg("/nonexistent/api.yaml")
        .arg("--output")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
