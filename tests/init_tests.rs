//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{init_vault, tagshift_cmd};

#[test]
fn test_init_creates_vault() {
    let temp = TempDir::new().unwrap();

    tagshift_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tagshift vault"));

    assert!(temp.path().join(".tagshift/config.toml").exists());
}

#[test]
fn test_init_twice_fails() {
    let vault = init_vault();

    tagshift_cmd()
        .arg("init")
        .arg(vault.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_config_list_shows_defaults() {
    let vault = init_vault();

    tagshift_cmd()
        .current_dir(vault.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("merge_policy = abort"))
        .stdout(predicate::str::contains("created = "));
}

#[test]
fn test_config_set_and_get() {
    let vault = init_vault();

    tagshift_cmd()
        .current_dir(vault.path())
        .args(["config", "merge_policy", "allow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set merge_policy = allow"));

    tagshift_cmd()
        .current_dir(vault.path())
        .args(["config", "merge_policy"])
        .assert()
        .success()
        .stdout(predicate::str::diff("allow\n"));
}

#[test]
fn test_config_invalid_policy_suggests_values() {
    let vault = init_vault();

    tagshift_cmd()
        .current_dir(vault.path())
        .args(["config", "merge_policy", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("abort, warn, allow"));
}

#[test]
fn test_config_found_from_subdirectory() {
    let vault = init_vault();
    let sub = vault.path().join("notes/deep");
    std::fs::create_dir_all(&sub).unwrap();

    tagshift_cmd()
        .current_dir(&sub)
        .args(["config", "merge_policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abort"));
}
