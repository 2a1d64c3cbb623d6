use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::{lazyreactor, multi_module_reactor};

#[test]
fn test_modules_lists_descendants_in_pre_order() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor().write_to(temp.path());

    lazyreactor(temp.path())
        .arg("modules")
        .arg(&reactor)
        .assert()
        .success()
        .stdout("core\ncore-impl\napp\n");
}

#[test]
fn test_modules_with_root() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor().write_to(temp.path());

    lazyreactor(temp.path())
        .arg("modules")
        .arg(&reactor)
        .args(["--root", "core"])
        .assert()
        .success()
        .stdout("core-impl\n");

    lazyreactor(temp.path())
        .arg("modules")
        .arg(&reactor)
        .args(["--root", "app"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_modules_unknown_root() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor().write_to(temp.path());

    lazyreactor(temp.path())
        .arg("modules")
        .arg(&reactor)
        .args(["--root", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Module 'ghost' is not part of the reactor"));
}

#[test]
fn test_modules_terminates_on_parent_cycle() {
    let temp = TempDir::new().unwrap();
    let reactor = lazyreactor_cli::test_utils::ReactorFixture::new("a")
        .module("a", Some("c"))
        .module("b", Some("a"))
        .module("c", Some("b"))
        .write_to(temp.path());

    lazyreactor(temp.path()).arg("modules").arg(&reactor).assert().success().stdout("b\nc\n");
}
