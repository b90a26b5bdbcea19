//! Error types for Bridgewright
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::NativeStep;

/// Result type alias for Bridgewright operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Main error type for Bridgewright operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Two native declarations share a JNI identity but disagree on signature
    #[error(
        "conflicting native declarations for {native_symbol} in {owning_class}: \
         {first} vs {second}"
    )]
    ConflictingDeclaration {
        owning_class: String,
        native_symbol: String,
        first: String,
        second: String,
    },

    /// The package prefix selected no Java sources
    #[error("no Java sources under '{}' for package prefix '{prefix}'", root.display())]
    NoSourcesMatched { root: PathBuf, prefix: String },

    /// A native method header could not be understood
    #[error("cannot parse native declaration in {}:{line}: {message}", file.display())]
    SourceParse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Header directory could not be created, cleaned or written
    #[error("failed to write headers at {}: {source}", path.display())]
    HeaderWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Native toolchain step exited non-zero (or could not start)
    #[error("native build failed at {step} step{}: {message}", exit_suffix(*exit_code))]
    NativeBuildFailure {
        step: NativeStep,
        exit_code: Option<i32>,
        message: String,
    },

    /// Artifact could not be copied into the resource bundle
    #[error("failed to package {}: {source}", path.display())]
    PackagingFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Managed-language compile command failed
    #[error("managed compile failed{}: {message}", exit_suffix(*exit_code))]
    ManagedCompileFailure {
        exit_code: Option<i32>,
        message: String,
    },

    /// Host application could not be launched or exited non-zero
    #[error("host launch failed{}: {message}", exit_suffix(*exit_code))]
    LaunchFailure {
        exit_code: Option<i32>,
        message: String,
    },

    /// Stage graph is not a valid DAG
    #[error("invalid stage graph: {message}")]
    InvalidStageGraph { message: String },

    /// Pipeline state machine was asked to move backwards or re-enter a state
    #[error("invalid pipeline transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Another run holds the project lock
    #[error("another bridgewright run is active (lock held on {})", lock.display())]
    PipelineBusy { lock: PathBuf },

    /// Configuration file is invalid
    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_suffix(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => String::new(),
    }
}
