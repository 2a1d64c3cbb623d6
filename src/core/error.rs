//! Error handling for lazyreactor.
//!
//! Two layers of errors exist:
//!
//! - [`LifecycleError`] is the single failure kind of the resolution core. It is
//!   raised by a [`DependencyResolver`] when a requested scope set cannot be
//!   satisfied and is propagated unchanged by the executors.
//! - [`LazyreactorError`] covers everything around the core: configuration,
//!   reactor description files and session construction.
//!
//! Application code works with [`anyhow::Result`]; [`user_friendly_error`] turns
//! any error back into an [`ErrorContext`] with a suggestion for the terminal.
//!
//! [`DependencyResolver`]: crate::resolver::DependencyResolver

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failure raised while resolving dependencies for a build step.
///
/// Malformed scope requirements are never reported through this type: they
/// expand to an empty scope set and simply resolve nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The resolver could not satisfy the requested scopes for a module.
    #[error("Failed to resolve dependencies of module '{module}' for scopes [{scopes}]: {reason}")]
    ResolutionFailed {
        /// Identity of the module being resolved
        module: String,
        /// The scopes that were requested, comma separated
        scopes: String,
        /// What went wrong (missing artifact, repository failure, ...)
        reason: String,
    },
}

/// Errors produced by the lazyreactor shell around the resolution core.
#[derive(Error, Debug, Clone)]
pub enum LazyreactorError {
    /// Dependency resolution failed for a build step
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Global configuration could not be read or understood
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A reactor description file is not valid
    #[error("Invalid reactor file {file}: {reason}")]
    ReactorParseError {
        /// Path of the offending file
        file: String,
        /// Parser or validation message
        reason: String,
    },

    /// A module referenced by id is not part of the session
    #[error("Module '{id}' is not part of the reactor")]
    ModuleNotFound {
        /// The missing module id
        id: String,
    },

    /// Two modules in one session share an id
    #[error("Module '{id}' is declared more than once")]
    DuplicateModule {
        /// The repeated module id
        id: String,
    },

    /// Anything else, with its full cause chain
    #[error("{message}")]
    Other {
        /// Rendered error message
        message: String,
    },
}

/// A user-facing error with optional details and a suggested fix.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LazyreactorError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: LazyreactorError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion, shown in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details explaining the error, shown in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for the terminal.
///
/// Known error types are downcast and given tailored suggestions. Anything
/// else keeps its full cause chain in the message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(known) = error.downcast_ref::<LazyreactorError>() {
        return create_error_context(known.clone());
    }

    if let Some(lifecycle) = error.downcast_ref::<LifecycleError>() {
        return create_error_context(LazyreactorError::Lifecycle(lifecycle.clone()));
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(LazyreactorError::ConfigError {
            message: toml_error.message().to_string(),
        })
        .with_suggestion("Check the TOML syntax of the file, e.g. matching brackets and quoted strings");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(LazyreactorError::Other {
        message,
    })
}

fn create_error_context(error: LazyreactorError) -> ErrorContext {
    match &error {
        LazyreactorError::Lifecycle(LifecycleError::ResolutionFailed { .. }) => {
            ErrorContext::new(error)
                .with_suggestion("Check that every dependency of the module is available, or mark it 'available = true' in the reactor file")
                .with_details("The build step was aborted because its dependencies could not be resolved")
        }
        LazyreactorError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or pass a different one with --config")
            .with_details("Known keys are 'strategy' (non-destructive | eager) and 'format' (text | json)"),
        LazyreactorError::ReactorParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Each [[modules]] entry needs an 'id'; 'current' must name one of them"),
        LazyreactorError::ModuleNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Use 'lazyreactor modules <file>' to list the modules of the reactor"),
        LazyreactorError::DuplicateModule { .. } => ErrorContext::new(error)
            .with_suggestion("Give every module in the reactor file a unique 'id'"),
        LazyreactorError::Other { .. } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution_failure() -> LifecycleError {
        LifecycleError::ResolutionFailed {
            module: "app".to_string(),
            scopes: "compile, runtime".to_string(),
            reason: "artifact org.example:lib:1.0 is not available".to_string(),
        }
    }

    #[test]
    fn test_resolution_failure_message() {
        assert_eq!(
            resolution_failure().to_string(),
            "Failed to resolve dependencies of module 'app' for scopes [compile, runtime]: \
             artifact org.example:lib:1.0 is not available"
        );
    }

    #[test]
    fn test_lifecycle_error_is_transparent() {
        let error = LazyreactorError::from(resolution_failure());
        assert_eq!(error.to_string(), resolution_failure().to_string());
    }

    #[test]
    fn test_user_friendly_error_downcasts_lifecycle() {
        let ctx = user_friendly_error(anyhow::Error::new(resolution_failure()));
        assert!(matches!(ctx.error, LazyreactorError::Lifecycle(_)));
        assert!(ctx.suggestion.is_some());
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_user_friendly_error_keeps_cause_chain() {
        let error = anyhow::anyhow!("root cause").context("while planning");
        let ctx = user_friendly_error(error);
        let rendered = ctx.to_string();
        assert!(rendered.contains("while planning"));
        assert!(rendered.contains("Caused by:"));
        assert!(rendered.contains("root cause"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(LazyreactorError::ModuleNotFound {
            id: "ghost".to_string(),
        })
        .with_details("details here")
        .with_suggestion("try this");
        assert_eq!(
            ctx.to_string(),
            "Module 'ghost' is not part of the reactor\nDetails: details here\nSuggestion: try this"
        );
    }
}
