//! CLI integration tests. None of these reach the network.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn retaildash() -> Command {
    let mut cmd = cargo_bin_cmd!("retaildash");
    cmd.env_remove("RETAILDASH_INVENTORY_URL")
        .env_remove("RETAILDASH_SALES_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn test_help() {
    retaildash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("retaildash"))
        .stdout(predicate::str::contains("inventory"))
        .stdout(predicate::str::contains("sales"))
        .stdout(predicate::str::contains("facets"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    retaildash()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("retaildash"));
}

#[test]
fn test_sales_help_lists_views() {
    retaildash()
        .args(["sales", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trends"))
        .stdout(predicate::str::contains("--year"));
}

#[test]
fn test_invalid_month_is_rejected() {
    retaildash()
        .args(["sales", "--month", "Smarch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a month"));
}

#[test]
fn test_config_validate_reports_invalid_value() {
    let (_dir, path) = write_temp_config("[http]\nretry_max_attempts = 0\n");

    retaildash()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("retry_max_attempts"));
}

#[test]
fn test_config_validate_accepts_good_file() {
    let (_dir, path) = write_temp_config("[sales]\nttl_secs = 120\n");

    retaildash()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = write_temp_config("[inventory]\nurl = \"http://localhost:1234/stores\"\n");

    let output = retaildash()
        .args(["config", "show", "--json", "--config"])
        .arg(&path)
        .output()
        .expect("run retaildash");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("config show emits JSON");
    assert_eq!(value["command"], "config.show");
    assert_eq!(value["endpoints"][0]["url"], "http://localhost:1234/stores");
    assert_eq!(value["endpoints"][1]["timeout_ms"], 10000);
}

#[test]
fn test_config_init_writes_file_once() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");

    retaildash()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[sales]"));

    retaildash()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    retaildash()
        .args(["config", "init", "--force"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_unreachable_inventory_reports_no_data() {
    let (_dir, path) = write_temp_config(
        "[inventory]\nurl = \"http://127.0.0.1:9/stores\"\ntimeout_ms = 2000\n",
    );

    retaildash()
        .args(["inventory", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no inventory data available"));
}
