//! Event Sink Implementations
//!
//! Provides concrete implementations of PipelineEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: Human-readable progress

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::{event_json, JsonEventSink};
