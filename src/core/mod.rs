//! Core types shared across lazyreactor: the error hierarchy and its
//! user-facing presentation.
//!
//! - [`LifecycleError`] - the single failure kind of dependency resolution
//! - [`LazyreactorError`] - configuration, reactor file and session errors
//! - [`ErrorContext`] / [`user_friendly_error`] - coloured terminal output with
//!   suggestions

pub mod error;

pub use error::{ErrorContext, LazyreactorError, LifecycleError, user_friendly_error};
