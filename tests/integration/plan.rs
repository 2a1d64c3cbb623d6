use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::common::{lazyreactor, multi_module_reactor};

fn plan_json(temp: &TempDir, reactor: &std::path::Path, strategy: &str) -> Value {
    let output = lazyreactor(temp.path())
        .arg("plan")
        .arg(reactor)
        .args(["--format", "json", "--strategy", strategy])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_plan_single_step_resolves_current_module_once() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor()
        .step("jar", false, "", "runtime+system")
        .write_to(temp.path());

    let report = plan_json(&temp, &reactor, "non-destructive");
    let step = &report["steps"][0];

    assert_eq!(report["total_resolutions"], 1);
    assert_eq!(step["resolutions"][0]["module"], "parent");
    assert_eq!(
        step["resolutions"][0]["scopes_to_resolve"],
        serde_json::json!(["compile", "system", "runtime"])
    );
    assert_eq!(step["filters"], serde_json::json!({ "parent": ["runtime+system"] }));
}

#[test]
fn test_plan_aggregator_visits_subtree_only() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor()
        .step("compiler:compile", false, "", "compile")
        .step("javadoc:aggregate", true, "", "compile")
        .step("javadoc:aggregate", true, "", "compile")
        .write_to(temp.path());

    let report = plan_json(&temp, &reactor, "non-destructive");
    let modules: Vec<&str> = report["steps"][1]["resolutions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["module"].as_str().unwrap())
        .collect();

    assert_eq!(modules, ["core", "core-impl", "app"]);
    assert_eq!(report["steps"][2]["resolutions"], serde_json::json!([]));
    assert_eq!(report["total_resolutions"], 4);
    // Aggregator filters cover the whole session, including `tools`.
    assert_eq!(report["steps"][1]["filters"]["tools"], serde_json::json!(["compile"]));
}

#[test]
fn test_plan_eager_strategy_from_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "strategy = \"eager\"\nformat = \"json\"\n")
        .unwrap();
    let reactor = multi_module_reactor()
        .step("compiler:compile", false, "", "compile")
        .step("javadoc:aggregate", true, "", "compile")
        .write_to(temp.path());

    let output = lazyreactor(temp.path()).arg("plan").arg(&reactor).output().unwrap();
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["strategy"], "eager");
    // parent twice, then every other module of the session, `tools` included.
    assert_eq!(report["total_resolutions"], 6);
}

#[test]
fn test_plan_text_output() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor()
        .step("compiler:compile", false, "", "compile")
        .step("clean", false, "", "")
        .write_to(temp.path());

    lazyreactor(temp.path())
        .arg("plan")
        .arg(&reactor)
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Planning parent (strategy: non-destructive)"))
        .stdout(predicate::str::contains("filter  parent [compile]"))
        .stdout(predicate::str::contains("1 resolver call(s)"));
}

#[test]
fn test_plan_resolution_failure() {
    let temp = TempDir::new().unwrap();
    let reactor = multi_module_reactor()
        .dependency("app", "com.example:unpublished:0.1", "compile", false)
        .step("site:aggregate", true, "", "compile")
        .write_to(temp.path());

    lazyreactor(temp.path())
        .arg("plan")
        .arg(&reactor)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve dependencies of module 'app'"))
        .stderr(predicate::str::contains("com.example:unpublished:0.1"));
}

#[test]
fn test_plan_invalid_reactor_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reactor.toml");
    std::fs::write(&path, "current = \"a\"\n[[modules]]\nparent = \"x\"\n").unwrap();

    lazyreactor(temp.path())
        .arg("plan")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid reactor file"));
}
