//! CLI smoke tests for pcompat.
//!
//! These tests verify that every command runs and reports through the
//! expected channel and exit code.

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the pcompat binary with an isolated project.
fn pcompat_cmd(base: &Path) -> Command {
  let mut cmd = cargo_bin_cmd!("pcompat");
  cmd
    .env("PLUGCOMPAT_BASE", base)
    .env("PLUGCOMPAT_OUT", base.join("target").join("out"))
    .env_remove("PLUGCOMPAT_ALLOW_MACHINE_PATH")
    .env_remove("RUST_LOG");
  cmd
}

fn project() -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir_all(temp.path().join("target").join("out")).unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  let temp = project();
  pcompat_cmd(temp.path())
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  let temp = project();
  pcompat_cmd(temp.path())
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("pcompat"));
}

#[test]
fn subcommand_help_works() {
  let temp = project();
  for cmd in &["info", "ref", "resolve", "encode-files", "decode-files", "check-record"] {
    pcompat_cmd(temp.path())
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// info
// =============================================================================

#[test]
#[serial]
fn info_lists_roots_as_json() {
  let temp = project();
  let output = pcompat_cmd(temp.path()).args(["info", "--output", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["separator"], "U+0000");
  assert_eq!(json["roots"]["BASE"], temp.path().display().to_string());
  assert_eq!(json["allow_machine_path"], false);
}

// =============================================================================
// ref / resolve
// =============================================================================

#[test]
#[serial]
fn ref_prints_root_relative_id() {
  let temp = project();
  let file = temp.path().join("target").join("out").join("App.class");
  std::fs::write(&file, "bytecode").unwrap();

  pcompat_cmd(temp.path())
    .arg("ref")
    .arg(&file)
    .assert()
    .success()
    .stdout(predicate::str::contains("${OUT}/App.class"))
    .stdout(predicate::str::contains("App.class"));
}

#[test]
#[serial]
fn ref_accepts_relative_roots() {
  let temp = project();
  std::fs::write(temp.path().join("target").join("out").join("App.class"), "bytecode").unwrap();

  pcompat_cmd(temp.path())
    .current_dir(temp.path())
    .env("PLUGCOMPAT_BASE", ".")
    .args(["--root", "OUT=target/out", "ref", "target/out/App.class"])
    .assert()
    .success()
    .stdout(predicate::str::contains("${OUT}/App.class"));
}

#[test]
#[serial]
fn ref_json_has_hash_and_size() {
  let temp = project();
  let file = temp.path().join("report.txt");
  std::fs::write(&file, "12345").unwrap();

  let output = pcompat_cmd(temp.path())
    .args(["--output", "json", "ref"])
    .arg(&file)
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["id"], "${BASE}/report.txt");
  assert_eq!(json["sizeBytes"], 5);
  assert_eq!(json["contentHash"].as_str().unwrap().len(), 64);
}

#[test]
#[serial]
fn ref_outside_roots_fails() {
  let temp = project();
  let elsewhere = TempDir::new().unwrap();
  let file = elsewhere.path().join("x.txt");
  std::fs::write(&file, "x").unwrap();

  pcompat_cmd(temp.path())
    .arg("ref")
    .arg(&file)
    .assert()
    .failure()
    .stderr(predicate::str::contains("outside every converter root"));
}

#[test]
#[serial]
fn ref_outside_roots_allowed_with_flag() {
  let temp = project();
  let elsewhere = TempDir::new().unwrap();
  let file = elsewhere.path().join("x.txt");
  std::fs::write(&file, "x").unwrap();

  pcompat_cmd(temp.path())
    .arg("--allow-machine-path")
    .arg("ref")
    .arg(&file)
    .assert()
    .success();
}

#[test]
#[serial]
fn resolve_uses_extra_roots() {
  let temp = project();
  let cache = temp.path().join("cache");

  pcompat_cmd(temp.path())
    .arg("--root")
    .arg(format!("CACHE={}", cache.display()))
    .args(["resolve", "${CACHE}/coursier/core.jar"])
    .assert()
    .success()
    .stdout(predicate::str::contains("core.jar"));
}

#[test]
#[serial]
fn resolve_unknown_root_fails() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args(["resolve", "${NOPE}/x"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown root 'NOPE'"));
}

#[test]
fn malformed_root_flag_is_rejected() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args(["--root", "CACHE", "info"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("NAME=DIR"));
}

// =============================================================================
// encode-files / decode-files
// =============================================================================

#[test]
fn encode_files_shows_separator() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args(["encode-files", "/a/x.jar", "/a/y.jar", "/a/z.jar"])
    .assert()
    .success()
    .stdout("/a/x.jar\\0/a/y.jar\\0/a/z.jar\n");
}

#[test]
fn decode_files_keeps_order() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args(["decode-files", "/a/z.jar\\0/a/x.jar"])
    .assert()
    .success()
    .stdout("/a/z.jar\n/a/x.jar\n");
}

#[test]
fn decode_empty_is_empty_list() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args(["--output", "json", "decode-files", ""])
    .assert()
    .success()
    .stdout(predicate::str::contains("[]"));
}

// =============================================================================
// check-record
// =============================================================================

#[test]
fn check_record_accepts_module() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args([
      "check-record",
      r#"{"organization":"org.example","name":"core","revision":"1.0"}"#,
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("org.example:core:1.0"));
}

#[test]
fn check_record_accepts_artifact() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args([
      "check-record",
      "--kind",
      "artifact",
      r#"{"name":"core","type":"src","extension":"jar","classifier":"sources"}"#,
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("core-sources.jar"));
}

#[test]
fn check_record_rejects_malformed() {
  let temp = project();
  pcompat_cmd(temp.path())
    .args(["check-record", r#"{"organization":"org.example""#])
    .assert()
    .failure()
    .stderr(predicate::str::contains("malformed module record"));
}
