//! Domain Ports
//!
//! Interfaces the domain and application layers depend on; infrastructure
//! provides the implementations.

mod command_runner;
mod native_toolchain;
mod pipeline_events;

pub use command_runner::{CommandOutput, CommandRunner, CommandSpec};
pub use native_toolchain::{NativeDirs, NativeToolchain, ToolchainFailure};
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink, RecordingEventSink};
