//! Bridgewright - JNI bridge build orchestrator
//!
//! Bridgewright keeps a Java host and its native library in step: it scans
//! the Java sources for `native` methods, regenerates the JNI headers, drives
//! the native build, and packages the library into the host's resource
//! bundle where the runtime loader looks for it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod parser;
pub mod presentation;

// Re-exports for convenience
pub use application::{Goal, PipelineFailure, PipelineOptions, PipelineReport, PipelineUseCase};
pub use config::Config;
pub use domain::entities::{DeclarationSet, EntryPointDeclaration, GeneratedHeader};
pub use domain::policies::PackagingConflictPolicy;
pub use domain::value_objects::{PackagePrefix, PlatformTag};
pub use error::{BridgeError, BridgeResult};
pub use parser::{parse_java_source, read_java_file};
