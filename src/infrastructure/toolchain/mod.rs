//! Toolchain Implementations
//!
//! Subprocess-backed implementations of the `CommandRunner` and
//! `NativeToolchain` ports.

mod process;
mod runner;

pub use process::{ProcessToolchain, HEADER_DIR_ENV};
pub use runner::ProcessCommandRunner;
