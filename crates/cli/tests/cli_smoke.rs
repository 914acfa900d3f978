//! CLI smoke tests for devlua.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the dev binary.
fn dev_cmd() -> Command {
  cargo_bin_cmd!("dev")
}

/// Minimal config with one appended override.
const CONFIG: &str = r#"
return {
  package = "myapp",
  platforms = { "x86_64-linux" },
  overrides = {
    cffi = { append = { "setuptools", "poetry" } },
  },
}
"#;

/// Lock file pinning the base recipe set for x86_64-linux.
const LOCK: &str = r#"
{
  "version": 1,
  "platforms": {
    "x86_64-linux": {
      "cffi": { "name": "cffi", "version": "2.0.1", "inputs": ["libffi"] },
      "myapp": { "name": "myapp", "inputs": ["cffi"] }
    }
  }
}
"#;

/// Create a temp directory with a config and a lock file.
fn temp_env() -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("env.lua"), CONFIG).unwrap();
  std::fs::write(temp.path().join("devlua.lock"), LOCK).unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  dev_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  dev_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("0.3"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["show", "shell", "platforms", "init"] {
    dev_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// platforms
// =============================================================================

#[test]
fn platforms_lists_supported_triples() {
  dev_cmd()
    .arg("platforms")
    .assert()
    .success()
    .stdout(predicate::str::contains("x86_64-linux"))
    .stdout(predicate::str::contains("aarch64-darwin"));
}

// =============================================================================
// show
// =============================================================================

#[test]
fn show_evaluates_config() {
  let temp = temp_env();
  dev_cmd()
    .current_dir(temp.path())
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("x86_64-linux"))
    .stdout(predicate::str::contains("myapp"));
}

#[test]
fn show_json_contains_patched_inputs() {
  let temp = temp_env();
  dev_cmd()
    .current_dir(temp.path())
    .args(["show", "--format", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("setuptools"))
    .stdout(predicate::str::contains("poetry"))
    .stdout(predicate::str::contains("myapp-shell"));
}

#[test]
fn show_fails_without_config() {
  let temp = TempDir::new().unwrap();
  dev_cmd().current_dir(temp.path()).arg("show").assert().failure();
}

#[test]
fn show_fails_without_lock_file() {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("env.lua"), CONFIG).unwrap();

  dev_cmd()
    .current_dir(temp.path())
    .arg("show")
    .assert()
    .failure()
    .stderr(predicate::str::contains("devlua.lock"));
}

#[test]
fn show_fails_when_package_missing_from_lock() {
  let temp = TempDir::new().unwrap();
  std::fs::write(
    temp.path().join("env.lua"),
    r#"return { package = "ghost", platforms = { "x86_64-linux" } }"#,
  )
  .unwrap();
  std::fs::write(temp.path().join("devlua.lock"), LOCK).unwrap();

  dev_cmd()
    .current_dir(temp.path())
    .arg("show")
    .assert()
    .failure()
    .stderr(predicate::str::contains("ghost"));
}

// =============================================================================
// shell
// =============================================================================

#[test]
fn shell_json_prints_dev_shell() {
  let temp = temp_env();
  dev_cmd()
    .current_dir(temp.path())
    .args(["shell", "--platform", "x86_64-linux", "--format", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("myapp-shell"))
    .stdout(predicate::str::contains(r#""myapp""#));
}

#[test]
fn shell_rejects_bad_platform_triple() {
  let temp = temp_env();
  dev_cmd()
    .current_dir(temp.path())
    .args(["shell", "--platform", "mips-plan9"])
    .assert()
    .failure();
}

#[test]
fn shell_fails_for_platform_missing_from_lock() {
  let temp = temp_env();
  dev_cmd()
    .current_dir(temp.path())
    .args(["shell", "--platform", "aarch64-darwin"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("aarch64-darwin"));
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_scaffolds_config() {
  let temp = TempDir::new().unwrap();
  dev_cmd()
    .current_dir(temp.path())
    .arg("init")
    .assert()
    .success();

  assert!(temp.path().join("env.lua").exists());
}

#[test]
fn init_refuses_to_overwrite() {
  let temp = TempDir::new().unwrap();
  dev_cmd().current_dir(temp.path()).arg("init").assert().success();
  dev_cmd()
    .current_dir(temp.path())
    .arg("init")
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_scaffold_evaluates() {
  // The scaffolded config must itself parse; give it a lock file with both
  // declared platforms so show succeeds end to end.
  let temp = TempDir::new().unwrap();
  dev_cmd().current_dir(temp.path()).arg("init").assert().success();

  let lock = r#"
  {
    "version": 1,
    "platforms": {
      "x86_64-linux": { "myapp": { "name": "myapp" } },
      "aarch64-darwin": { "myapp": { "name": "myapp" } }
    }
  }
  "#;
  std::fs::write(temp.path().join("devlua.lock"), lock).unwrap();

  dev_cmd()
    .current_dir(temp.path())
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("myapp"));
}
