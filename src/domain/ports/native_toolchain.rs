//! Native Toolchain Port
//!
//! The orchestrator treats the native build as a black box with two strictly
//! ordered steps. Implementations:
//! - `ProcessToolchain` - runs configure/build commands as subprocesses
//! - test doubles that record calls or fail on demand

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::PlatformTag;

/// Directory handles the toolchain works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeDirs {
    /// Native project root (working directory of both steps)
    pub source_dir: PathBuf,
    /// Freshly generated JNI headers
    pub header_dir: PathBuf,
    /// Where the toolchain leaves the finished library
    pub artifact_path: PathBuf,
    pub platform: PlatformTag,
}

impl NativeDirs {
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn header_dir(&self) -> &Path {
        &self.header_dir
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }
}

/// Why a toolchain step failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainFailure {
    /// `None` if the process could not start, was killed, or timed out
    pub exit_code: Option<i32>,
    pub message: String,
}

impl ToolchainFailure {
    pub fn exited(code: i32, message: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ToolchainFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "exit code {}: {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Native build capability
pub trait NativeToolchain {
    /// Generate the native build graph
    fn configure(&self, dirs: &NativeDirs) -> Result<(), ToolchainFailure>;

    /// Build the graph; returns the produced library path
    fn build(&self, dirs: &NativeDirs) -> Result<PathBuf, ToolchainFailure>;

    /// Short name for logs
    fn describe(&self) -> String {
        "native toolchain".to_string()
    }
}

impl<T: NativeToolchain + ?Sized> NativeToolchain for &T {
    fn configure(&self, dirs: &NativeDirs) -> Result<(), ToolchainFailure> {
        (**self).configure(dirs)
    }

    fn build(&self, dirs: &NativeDirs) -> Result<PathBuf, ToolchainFailure> {
        (**self).build(dirs)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
