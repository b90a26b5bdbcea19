//! Pipeline Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables progress reporting, JSON event streams, and test assertions.

use std::path::PathBuf;

use crate::domain::services::Stage;
use crate::domain::value_objects::{ContentHash, NativeStep};

/// Event emitted during a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Run started with a validated plan
    Started { goal: String, plan: Vec<Stage> },

    StageStarted { stage: Stage },

    /// Stage intentionally not executed (e.g. no managed compile command)
    StageSkipped { stage: Stage, reason: String },

    StageCompleted { stage: Stage },

    /// Scanner finished
    DeclarationsScanned { files: usize, declarations: usize },

    /// A previous header was removed during the clean-slate step
    HeaderDeleted { path: PathBuf },

    HeaderGenerated { path: PathBuf, hash: ContentHash },

    NativeStepStarted { step: NativeStep, command: String },

    NativeStepFinished { step: NativeStep },

    /// A bundle candidate lost its slot to the conflict policy
    ResourceDropped { path: PathBuf, source: PathBuf },

    ResourcePackaged { path: PathBuf, hash: ContentHash },

    Completed { stages: usize },

    Failed { stage: Stage, error: String },
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - ConsoleEventSink: human-readable progress on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PipelineEventSink: Send + Sync {
    fn on_event(&self, event: PipelineEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}

/// Collects events in memory (tests and embedding)
#[derive(Default)]
pub struct RecordingEventSink {
    events: std::sync::Mutex<Vec<PipelineEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl PipelineEventSink for RecordingEventSink {
    fn on_event(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
