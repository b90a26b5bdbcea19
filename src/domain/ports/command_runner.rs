//! Command Runner Port
//!
//! Abstraction over launching external commands (native toolchain steps,
//! managed compile, host launch) so orchestration can be tested without them.

use std::path::PathBuf;
use std::time::Duration;

use super::ToolchainFailure;

/// A fully resolved external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// Build from an argv list; `None` when the list is empty
    pub fn from_argv(argv: &[String], cwd: impl Into<PathBuf>) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            cwd: cwd.into(),
            env: Vec::new(),
            timeout: None,
        })
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shell-like rendering for logs
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands synchronously
pub trait CommandRunner {
    /// Run to completion; non-zero exit, spawn failure or timeout is a `ToolchainFailure`
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ToolchainFailure>;

    /// Run attached to this process's stdin, stdout and stderr until it exits.
    ///
    /// Nothing is captured: the child talks to the user directly.
    fn launch(&self, spec: &CommandSpec) -> Result<(), ToolchainFailure>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ToolchainFailure> {
        (**self).run(spec)
    }

    fn launch(&self, spec: &CommandSpec) -> Result<(), ToolchainFailure> {
        (**self).launch(spec)
    }
}
