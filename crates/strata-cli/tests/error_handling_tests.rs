//! Tests for error handling, exit codes and suggestions.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn strata(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("STRATA_TEMPLATES_DIR")
        .env("NO_COLOR", "1")
        .arg("--no-banner");
    cmd
}

#[test]
fn invalid_project_name_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["new", ".hidden"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn empty_entity_name_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["entity", "", "-f", "name:string"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("entity name"));
}

#[test]
fn missing_project_root_is_not_found() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["docs", "-o", "does-not-exist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Project root not found"));
}

#[test]
fn unusable_template_dir_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["--templates", "nowhere", "new", "shop"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("STRATA_TEMPLATES_DIR"));
    assert!(!temp.path().join("shop").exists());
}

#[test]
fn missing_explicit_config_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["-c", "absent.toml", "templates"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_driver_is_rejected_by_the_parser() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["new", "shop", "--db-driver", "oracle"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("oracle"));
}

#[cfg(unix)]
#[test]
fn unwritable_root_fails_the_run() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

    // root ignores permission bits
    let is_root = std::fs::write(locked.join("probe"), "").is_ok();
    if !is_root {
        strata(temp.path())
            .args(["new", "shop", "-o", "locked"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Cannot create project root"));
    }

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
}
