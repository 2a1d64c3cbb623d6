use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::lazyreactor;

#[test]
fn test_config_show_defaults_when_missing() {
    let temp = TempDir::new().unwrap();
    lazyreactor(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("strategy = \"non-destructive\""));
}

#[test]
fn test_config_path_honours_flag() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("custom.toml");

    lazyreactor(temp.path())
        .arg("--config")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "strategy = \"sometimes\"\n").unwrap();

    lazyreactor(temp.path())
        .args(["expand", "compile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
