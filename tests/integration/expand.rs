use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::lazyreactor;

#[test]
fn test_expand_runtime_system() {
    let temp = TempDir::new().unwrap();
    lazyreactor(temp.path())
        .args(["expand", "runtime+system"])
        .assert()
        .success()
        .stdout("compile, system, runtime\n");
}

#[test]
fn test_expand_test_as_json() {
    let temp = TempDir::new().unwrap();
    lazyreactor(temp.path())
        .args(["expand", "test", "--format", "json"])
        .assert()
        .success()
        .stdout("[\"compile\",\"provided\",\"system\",\"runtime\",\"test\"]\n");
}

#[test]
fn test_expand_unknown_requirement_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    lazyreactor(temp.path())
        .args(["expand", "import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no scopes)"));
}

#[test]
fn test_expand_empty_requirement() {
    let temp = TempDir::new().unwrap();
    lazyreactor(temp.path())
        .args(["expand", "", "--format", "json"])
        .assert()
        .success()
        .stdout("[]\n");
}
