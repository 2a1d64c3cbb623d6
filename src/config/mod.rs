//! Configuration management for lazyreactor.
//!
//! Only one layer exists: the global configuration in
//! `~/.lazyreactor/config.toml`, which picks the resolution strategy and the
//! default report format. Command line flags override it per invocation.

mod global;

pub use global::{GlobalConfig, OutputFormat};
