//! Console Event Sink
//!
//! Human-readable progress lines on stderr. Per-file events are only shown
//! when `detailed` is set (`-v`).

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    detailed: bool,
}

impl ConsoleEventSink {
    pub fn stderr(detailed: bool) -> Self {
        Self::with_writer(io::stderr(), detailed)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, detailed: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            detailed,
        }
    }

    fn line(&self, event: &PipelineEvent) -> Option<String> {
        let line = match event {
            PipelineEvent::Started { goal, plan } => format!(
                "==> {} ({})",
                goal,
                plan.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" -> ")
            ),
            PipelineEvent::StageStarted { stage } => format!("--> {}", stage),
            PipelineEvent::StageSkipped { stage, reason } => {
                format!("--> {} skipped: {}", stage, reason)
            }
            PipelineEvent::StageCompleted { .. } => return None,
            PipelineEvent::DeclarationsScanned {
                files,
                declarations,
            } => format!(
                "    {} native declaration(s) in {} file(s)",
                declarations, files
            ),
            PipelineEvent::HeaderDeleted { path } if self.detailed => {
                format!("    - {}", path.display())
            }
            PipelineEvent::HeaderGenerated { path, hash } if self.detailed => {
                format!("    + {} ({})", path.display(), hash.short())
            }
            PipelineEvent::NativeStepStarted { step, command } => {
                format!("    {}: {}", step, command)
            }
            PipelineEvent::ResourceDropped { path, source } if self.detailed => format!(
                "    ~ {} (ignored duplicate from {})",
                path.display(),
                source.display()
            ),
            PipelineEvent::ResourcePackaged { path, .. } => format!("    => {}", path.display()),
            PipelineEvent::Completed { stages } => format!("==> done ({} stages)", stages),
            PipelineEvent::Failed { stage, error } => format!("==> {} failed: {}", stage, error),
            _ => return None,
        };
        Some(line)
    }
}

impl PipelineEventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let Some(line) = self.line(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}
