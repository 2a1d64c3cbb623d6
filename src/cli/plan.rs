//! `lazyreactor plan` - run a reactor file's steps through an executor and
//! report the resolution work it caused.
//!
//! One [`DependencyContext`] is shared by every step, scoped to the file's
//! current module with the union of all steps' requirements, the way a host
//! prepares a context for a whole build plan.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{GlobalConfig, OutputFormat};
use crate::core::LazyreactorError;
use crate::reactor::{ModuleId, ReactorFile};
use crate::resolver::{
    CatalogResolver, DependencyContext, EnsureDependencies, Executor, ResolutionRecord, Strategy,
};
use crate::scope::display_scopes;

#[derive(Args)]
pub struct PlanCommand {
    /// Reactor description file
    reactor: PathBuf,

    /// Resolution strategy (defaults to the configured strategy)
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

/// Outcome of running every step of a reactor file.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub strategy: Strategy,
    pub current: ModuleId,
    pub steps: Vec<StepReport>,
    pub total_resolutions: usize,
}

/// What one step caused.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: String,
    pub aggregator: bool,
    /// Resolver calls made for this step, in order.
    pub resolutions: Vec<ResolutionRecord>,
    /// Filter tags per module after the step; modules without a filter are omitted.
    pub filters: BTreeMap<ModuleId, Vec<String>>,
}

/// Run every step of `file` through the executor selected by `strategy`.
///
/// # Errors
///
/// Fails if the file does not describe a valid session or a step's
/// dependencies cannot be resolved.
pub fn run_plan(file: &ReactorFile, strategy: Strategy) -> Result<PlanReport, LazyreactorError> {
    let mut session = file.to_session()?;
    let steps = file.step_descriptors();
    let mut context = DependencyContext::for_plan(session.current().clone(), &steps);
    let mut executor = Executor::new(strategy, CatalogResolver::new());

    let mut reports = Vec::with_capacity(steps.len());
    for step in &steps {
        let before = executor.resolver().records().len();
        executor.ensure_dependencies_resolved(step, &mut session, &mut context)?;

        let filters: BTreeMap<ModuleId, Vec<String>> = session
            .modules()
            .iter()
            .filter_map(|module| {
                module
                    .artifact_filter()
                    .map(|filter| (module.id().clone(), filter.scopes().iter().cloned().collect()))
            })
            .collect();

        reports.push(StepReport {
            name: step.name.clone(),
            aggregator: step.aggregator,
            resolutions: executor.resolver().records()[before..].to_vec(),
            filters,
        });
    }

    Ok(PlanReport {
        strategy,
        current: session.current().clone(),
        total_resolutions: executor.resolver().records().len(),
        steps: reports,
    })
}

impl PlanCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = GlobalConfig::load_with_optional(config_path).await?;
        let file = ReactorFile::load(&self.reactor).await?;
        let strategy = self.strategy.unwrap_or(config.strategy);

        tracing::debug!("Planning {} with the {strategy} strategy", self.reactor.display());
        let report = run_plan(&file, strategy)?;

        match self.format.unwrap_or(config.format) {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_report(&report),
        }
        Ok(())
    }
}

fn print_report(report: &PlanReport) {
    println!(
        "{} {} (strategy: {})",
        "Planning".green().bold(),
        report.current,
        report.strategy
    );

    for step in &report.steps {
        let kind = if step.aggregator { " [aggregator]" } else { "" };
        println!("\n{}{}", step.name.bold(), kind.cyan());

        if step.resolutions.is_empty() {
            println!("  {}", "nothing to resolve".dimmed());
        }
        for record in &step.resolutions {
            println!(
                "  resolve {} collect=[{}] resolve=[{}]",
                record.module.to_string().yellow(),
                display_scopes(&record.scopes_to_collect),
                display_scopes(&record.scopes_to_resolve)
            );
        }
        for (module, tags) in &step.filters {
            println!("  filter  {} [{}]", module, tags.join(", "));
        }
    }

    println!("\n{} resolver call(s)", report.total_resolutions);
}

#[cfg(test)]
mod tests {
    use super::*;

    const REACTOR: &str = r#"
current = "parent"

[[modules]]
id = "parent"

[[modules]]
id = "core"
parent = "parent"

[[modules.dependencies]]
coordinate = "org.slf4j:slf4j-api:2.0.13"

[[modules]]
id = "app"
parent = "parent"

[[modules.dependencies]]
coordinate = "org.postgresql:postgresql:42.7.3"
scope = "runtime"

[[steps]]
name = "compiler:compile"
resolution = "compile"

[[steps]]
name = "compiler:compile"
resolution = "compile"

[[steps]]
name = "javadoc:aggregate"
aggregator = true
resolution = "runtime"
"#;

    #[test]
    fn test_non_destructive_plan() {
        let file = ReactorFile::parse(REACTOR).unwrap();
        let report = run_plan(&file, Strategy::NonDestructive).unwrap();

        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.steps[0].resolutions.len(), 1);
        assert!(report.steps[1].resolutions.is_empty());

        let aggregated: Vec<_> =
            report.steps[2].resolutions.iter().map(|r| r.module.as_str()).collect();
        assert_eq!(aggregated, ["core", "app"]);
        assert_eq!(report.steps[2].filters.len(), 3);
        assert_eq!(report.total_resolutions, 3);
    }

    #[test]
    fn test_eager_plan_does_more_work() {
        let file = ReactorFile::parse(REACTOR).unwrap();
        let lazy = run_plan(&file, Strategy::NonDestructive).unwrap();
        let eager = run_plan(&file, Strategy::Eager).unwrap();

        assert_eq!(eager.total_resolutions, 5);
        assert!(eager.total_resolutions > lazy.total_resolutions);
    }

    #[test]
    fn test_plan_failure_is_lifecycle_error() {
        let file = ReactorFile::parse(
            r#"
current = "a"
[[modules]]
id = "a"
[[modules.dependencies]]
coordinate = "org.example:gone:1.0"
available = false
[[steps]]
name = "compile"
resolution = "compile"
"#,
        )
        .unwrap();

        let err = run_plan(&file, Strategy::NonDestructive).unwrap_err();
        assert!(matches!(err, LazyreactorError::Lifecycle(_)));
    }
}
