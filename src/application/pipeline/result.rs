//! Pipeline Result
//!
//! Result types for pipeline runs.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{BuildArtifact, GeneratedHeader, PackagedResource};
use crate::domain::services::Stage;
use crate::error::BridgeError;

use super::options::Goal;

/// How a stage ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum StageOutcome {
    Completed,
    Skipped { reason: String },
}

/// One executed (or skipped) stage
#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    #[serde(flatten)]
    pub outcome: StageOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl StageRecord {
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, StageOutcome::Skipped { .. })
    }
}

/// Result of a successful pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub goal: Goal,
    pub stages: Vec<StageRecord>,
    /// Number of native declarations scanned
    pub declarations: usize,
    /// Headers on disk after generation
    pub headers: Vec<GeneratedHeader>,
    /// Previous headers removed by the clean slate
    pub deleted_headers: Vec<PathBuf>,
    pub artifact: Option<BuildArtifact>,
    pub packaged: Vec<PackagedResource>,
    /// Candidates that lost their bundle slot
    pub dropped: Vec<PackagedResource>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PipelineReport {
    pub(crate) fn new(goal: Goal, started_at: DateTime<Utc>) -> Self {
        Self {
            goal,
            stages: Vec::new(),
            declarations: 0,
            headers: Vec::new(),
            deleted_headers: Vec::new(),
            artifact: None,
            packaged: Vec::new(),
            dropped: Vec::new(),
            started_at,
            finished_at: started_at,
        }
    }

    /// Stages that actually ran
    pub fn completed_stages(&self) -> Vec<Stage> {
        self.stages
            .iter()
            .filter(|r| !r.is_skipped())
            .map(|r| r.stage)
            .collect()
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// A run aborted at a stage boundary
#[derive(Debug)]
pub struct PipelineFailure {
    /// `None` when the run failed before any stage started (lock, planning)
    pub stage: Option<Stage>,
    pub error: BridgeError,
    /// Stages that finished before the failure
    pub completed: Vec<Stage>,
}

impl PipelineFailure {
    pub(crate) fn before_start(error: BridgeError) -> Self {
        Self {
            stage: None,
            error,
            completed: Vec::new(),
        }
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "stage '{}' failed: {}", stage, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::NativeStep;

    #[test]
    fn failure_display_names_stage_and_cause() {
        let failure = PipelineFailure {
            stage: Some(Stage::CompileNative),
            error: BridgeError::NativeBuildFailure {
                step: NativeStep::Configure,
                exit_code: Some(1),
                message: "no CMakeLists.txt".to_string(),
            },
            completed: vec![Stage::Scan, Stage::GenerateHeaders],
        };
        assert_eq!(
            failure.to_string(),
            "stage 'compile-native' failed: native build failed at configure step \
             (exit code 1): no CMakeLists.txt"
        );
    }

    #[test]
    fn failure_before_start_is_just_the_error() {
        let failure = PipelineFailure::before_start(BridgeError::PipelineBusy {
            lock: PathBuf::from("/p/.bridgewright.lock"),
        });
        assert!(failure.to_string().starts_with("another bridgewright run"));
    }

    #[test]
    fn stage_record_serializes_outcome_inline() {
        let now = Utc::now();
        let record = StageRecord {
            stage: Stage::CompileManaged,
            outcome: StageOutcome::Skipped {
                reason: "no managed.compile command".to_string(),
            },
            started_at: now,
            finished_at: now,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["stage"], "compile-managed");
        assert_eq!(value["outcome"], "skipped");
        assert_eq!(value["reason"], "no managed.compile command");
    }
}
