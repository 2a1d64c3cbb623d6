//! Test helpers shared by unit and integration tests.
//!
//! Available under `cfg(test)` and the `test-utils` feature.

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::reactor::manifest::{DependencyEntry, ModuleEntry};
use crate::reactor::{ReactorFile, StepEntry};
use crate::scope::Scope;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Builder for reactor description files.
///
/// ```rust,no_run
/// use lazyreactor_cli::test_utils::ReactorFixture;
///
/// let toml = ReactorFixture::new("a")
///     .module("a", None)
///     .module("b", Some("a"))
///     .dependency("b", "org.example:lib:1.0", "compile", true)
///     .step("package", false, "", "runtime")
///     .to_toml();
/// ```
#[derive(Debug, Clone)]
pub struct ReactorFixture {
    file: ReactorFile,
}

impl ReactorFixture {
    pub fn new(current: &str) -> Self {
        Self {
            file: ReactorFile {
                current: current.to_string(),
                modules: Vec::new(),
                steps: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn module(mut self, id: &str, parent: Option<&str>) -> Self {
        self.file.modules.push(ModuleEntry {
            id: id.to_string(),
            parent: parent.map(str::to_string),
            dependencies: Vec::new(),
        });
        self
    }

    /// Add a dependency to an already added module.
    ///
    /// # Panics
    ///
    /// Panics if the module was not added or `scope` is not a scope name.
    #[must_use]
    pub fn dependency(mut self, module: &str, coordinate: &str, scope: &str, available: bool) -> Self {
        let scope = Scope::parse(scope).unwrap_or_else(|| panic!("unknown scope {scope}"));
        let entry = self
            .file
            .modules
            .iter_mut()
            .find(|entry| entry.id == module)
            .unwrap_or_else(|| panic!("module {module} not added"));
        entry.dependencies.push(DependencyEntry {
            coordinate: coordinate.to_string(),
            scope,
            available,
        });
        self
    }

    #[must_use]
    pub fn step(mut self, name: &str, aggregator: bool, collection: &str, resolution: &str) -> Self {
        self.file.steps.push(StepEntry {
            name: name.to_string(),
            aggregator,
            collection: collection.to_string(),
            resolution: resolution.to_string(),
        });
        self
    }

    pub fn build(self) -> ReactorFile {
        self.file
    }

    pub fn to_toml(&self) -> String {
        toml::to_string(&self.file).expect("reactor fixture serializes")
    }

    /// Write the fixture as `reactor.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("reactor.toml");
        std::fs::write(&path, self.to_toml()).expect("write reactor fixture");
        path
    }
}
