//! Process-backed native toolchain
//!
//! Runs configurable configure/build commands (CMake by default) in the
//! native source directory. The produced library is found by convention, not
//! by parsing build output.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::domain::ports::{
    CommandRunner, CommandSpec, NativeDirs, NativeToolchain, ToolchainFailure,
};

/// Environment variable carrying the header directory to the native build
pub const HEADER_DIR_ENV: &str = "BRIDGEWRIGHT_HEADER_DIR";

/// Native toolchain driven by external commands
#[derive(Debug, Clone)]
pub struct ProcessToolchain<R: CommandRunner> {
    runner: R,
    configure: Vec<String>,
    build: Vec<String>,
    timeout: Option<Duration>,
}

impl<R: CommandRunner> ProcessToolchain<R> {
    pub fn new(runner: R, configure: Vec<String>, build: Vec<String>) -> Self {
        Self {
            runner,
            configure,
            build,
            timeout: None,
        }
    }

    /// Bound each step; an expired step is killed
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spec(&self, argv: &[String], dirs: &NativeDirs, step: &str) -> Result<CommandSpec, ToolchainFailure> {
        let spec = CommandSpec::from_argv(argv, dirs.source_dir())
            .ok_or_else(|| ToolchainFailure::other(format!("no {} command configured", step)))?;
        Ok(spec
            .with_env(HEADER_DIR_ENV, dirs.header_dir().display().to_string())
            .with_timeout(self.timeout))
    }

    fn run(&self, argv: &[String], dirs: &NativeDirs, step: &str) -> Result<(), ToolchainFailure> {
        let spec = self.spec(argv, dirs, step)?;
        let output = self.runner.run(&spec)?;
        for line in output.stdout.lines() {
            debug!(step, "{}", line);
        }
        Ok(())
    }
}

impl<R: CommandRunner> NativeToolchain for ProcessToolchain<R> {
    fn configure(&self, dirs: &NativeDirs) -> Result<(), ToolchainFailure> {
        self.run(&self.configure, dirs, "configure")
    }

    fn build(&self, dirs: &NativeDirs) -> Result<PathBuf, ToolchainFailure> {
        self.run(&self.build, dirs, "build")?;
        Ok(dirs.artifact_path().to_path_buf())
    }

    fn describe(&self) -> String {
        self.configure
            .first()
            .cloned()
            .unwrap_or_else(|| "native toolchain".to_string())
    }
}
