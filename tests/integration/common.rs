//! Shared helpers for integration tests.

use assert_cmd::Command;
use lazyreactor_cli::test_utils::ReactorFixture;
use std::path::Path;

/// A `lazyreactor` command isolated from the user's configuration.
pub fn lazyreactor(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lazyreactor").unwrap();
    cmd.env("LAZYREACTOR_CONFIG", config_dir.join("config.toml")).env_remove("RUST_LOG");
    cmd
}

/// parent → {core, app}, core → {core-impl}, plus a standalone `tools` root.
pub fn multi_module_reactor() -> ReactorFixture {
    ReactorFixture::new("parent")
        .module("parent", None)
        .module("core", Some("parent"))
        .dependency("core", "org.slf4j:slf4j-api:2.0.13", "compile", true)
        .dependency("core", "org.junit.jupiter:junit-jupiter:5.10.2", "test", true)
        .module("core-impl", Some("core"))
        .dependency("core-impl", "com.zaxxer:HikariCP:5.1.0", "compile", true)
        .module("app", Some("parent"))
        .dependency("app", "org.postgresql:postgresql:42.7.3", "runtime", true)
        .module("tools", None)
        .dependency("tools", "info.picocli:picocli:4.7.6", "compile", true)
}
