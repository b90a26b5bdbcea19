//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// NDJSON representation of one event
pub fn event_json(event: &PipelineEvent) -> serde_json::Value {
    match event {
        PipelineEvent::Started { goal, plan } => serde_json::json!({
            "event": "start",
            "goal": goal,
            "plan": plan,
        }),

        PipelineEvent::StageStarted { stage } => serde_json::json!({
            "event": "stage_start",
            "stage": stage,
        }),

        PipelineEvent::StageSkipped { stage, reason } => serde_json::json!({
            "event": "stage_skipped",
            "stage": stage,
            "reason": reason,
        }),

        PipelineEvent::StageCompleted { stage } => serde_json::json!({
            "event": "stage_complete",
            "stage": stage,
        }),

        PipelineEvent::DeclarationsScanned {
            files,
            declarations,
        } => serde_json::json!({
            "event": "scanned",
            "files": files,
            "declarations": declarations,
        }),

        PipelineEvent::HeaderDeleted { path } => serde_json::json!({
            "event": "header_deleted",
            "path": path.display().to_string(),
        }),

        PipelineEvent::HeaderGenerated { path, hash } => serde_json::json!({
            "event": "header_generated",
            "path": path.display().to_string(),
            "hash": hash,
        }),

        PipelineEvent::NativeStepStarted { step, command } => serde_json::json!({
            "event": "native_step_start",
            "step": step,
            "command": command,
        }),

        PipelineEvent::NativeStepFinished { step } => serde_json::json!({
            "event": "native_step_complete",
            "step": step,
        }),

        PipelineEvent::ResourceDropped { path, source } => serde_json::json!({
            "event": "resource_dropped",
            "path": path.display().to_string(),
            "source": source.display().to_string(),
        }),

        PipelineEvent::ResourcePackaged { path, hash } => serde_json::json!({
            "event": "resource_packaged",
            "path": path.display().to_string(),
            "hash": hash,
        }),

        PipelineEvent::Completed { stages } => serde_json::json!({
            "event": "complete",
            "status": "success",
            "stages": stages,
        }),

        PipelineEvent::Failed { stage, error } => serde_json::json!({
            "event": "complete",
            "status": "failed",
            "stage": stage,
            "error": error,
        }),
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.write_event(event_json(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::Stage;
    use crate::domain::value_objects::NativeStep;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(PipelineEvent::Started {
            goal: "build".to_string(),
            plan: vec![Stage::Scan, Stage::GenerateHeaders],
        });

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("\"event\":\"start\""));
        assert!(output.contains("\"plan\":[\"scan\",\"generate-headers\"]"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn json_sink_outputs_failure_with_stage() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(PipelineEvent::Failed {
            stage: Stage::CompileNative,
            error: "native build failed at configure step".to_string(),
        });

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("\"status\":\"failed\""));
        assert!(output.contains("\"stage\":\"compile-native\""));
    }

    #[test]
    fn native_steps_serialize_lowercase() {
        let json = event_json(&PipelineEvent::NativeStepFinished {
            step: NativeStep::Configure,
        });
        assert_eq!(json["step"], "configure");
    }
}
