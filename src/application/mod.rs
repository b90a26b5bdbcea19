//! Application Layer
//!
//! Use cases that orchestrate the bridge flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Stages
//!
//! - `scanner` - Discover native declarations under a package prefix
//! - `header_generator` - Regenerate the JNI header directory
//! - `native_build` - Configure and build the native library
//! - `packager` - Place the library into the resource bundle
//!
//! ## Use Cases
//!
//! - `PipelineUseCase` - Runs the stage graph for a goal
//! - `check_headers` - Header staleness report

pub mod check;
pub mod header_generator;
pub mod native_build;
pub mod packager;
pub mod pipeline;
pub mod scanner;

pub use check::{check_headers, HeaderCheck};
pub use header_generator::{generate_headers, HeaderDir, HeaderGeneration};
pub use native_build::compile_native;
pub use packager::{artifact_candidate, package_artifact, PackagingOutcome, ResourceBundle};
pub use pipeline::{
    Goal, PipelineFailure, PipelineOptions, PipelineReport, PipelineUseCase, StageOutcome,
    StageRecord,
};
pub use scanner::{scan_declarations, ScanResult};
