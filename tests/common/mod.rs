//! Common test utilities for bridgewright integration tests.
//!
//! This module provides:
//! - `TestProject`: Isolated project tree with Java sources and config
//! - Assertion macros: `assert_output_contains!`, `assert_file_contains!`
//! - Fixtures: Java sources and config snippets

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
