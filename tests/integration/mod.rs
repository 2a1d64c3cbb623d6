//! Integration test suite for lazyreactor
//!
//! Drives the `lazyreactor` binary end to end against reactor files written
//! into temporary directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: global configuration loading and display
//! - **expand**: scope requirement expansion
//! - **modules**: descendant listing
//! - **plan**: running steps through the executors

mod common;

mod config;
mod expand;
mod modules;
mod plan;
