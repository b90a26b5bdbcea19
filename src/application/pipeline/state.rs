//! Pipeline state machine
//!
//! States only move forward. Any non-terminal state may fail; `Done` and
//! `Failed` are terminal.

use std::fmt;

use crate::domain::services::Stage;
use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Scanning,
    GeneratingHeaders,
    CompilingManaged,
    CompilingNative,
    Packaging,
    Launching,
    Done,
    Failed { stage: Stage, cause: String },
}

impl PipelineState {
    /// State entered while `stage` runs
    pub fn running(stage: Stage) -> Self {
        match stage {
            Stage::Scan => PipelineState::Scanning,
            Stage::GenerateHeaders => PipelineState::GeneratingHeaders,
            Stage::CompileManaged => PipelineState::CompilingManaged,
            Stage::CompileNative => PipelineState::CompilingNative,
            Stage::Package => PipelineState::Packaging,
            Stage::Run => PipelineState::Launching,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }

    fn rank(&self) -> u8 {
        match self {
            PipelineState::Idle => 0,
            PipelineState::Scanning => 1,
            PipelineState::GeneratingHeaders => 2,
            PipelineState::CompilingManaged => 3,
            PipelineState::CompilingNative => 4,
            PipelineState::Packaging => 5,
            PipelineState::Launching => 6,
            PipelineState::Done => 7,
            PipelineState::Failed { .. } => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Scanning => "scanning",
            PipelineState::GeneratingHeaders => "generating-headers",
            PipelineState::CompilingManaged => "compiling-managed",
            PipelineState::CompilingNative => "compiling-native",
            PipelineState::Packaging => "packaging",
            PipelineState::Launching => "launching",
            PipelineState::Done => "done",
            PipelineState::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Forward-only state tracker for one run
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
            history: vec![PipelineState::Idle],
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Every state entered so far, starting with `Idle`
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    /// Move to a later state; stages not in the plan are skipped over
    pub fn advance(&mut self, next: PipelineState) -> BridgeResult<()> {
        if self.state.is_terminal()
            || matches!(next, PipelineState::Failed { .. })
            || next.rank() <= self.state.rank()
        {
            return Err(self.invalid(&next));
        }
        self.enter(next);
        Ok(())
    }

    pub fn fail(&mut self, stage: Stage, cause: impl Into<String>) -> BridgeResult<()> {
        let next = PipelineState::Failed {
            stage,
            cause: cause.into(),
        };
        if self.state.is_terminal() {
            return Err(self.invalid(&next));
        }
        self.enter(next);
        Ok(())
    }

    fn enter(&mut self, next: PipelineState) {
        self.history.push(next.clone());
        self.state = next;
    }

    fn invalid(&self, next: &PipelineState) -> BridgeError {
        BridgeError::InvalidTransition {
            from: self.state.to_string(),
            to: next.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_forward_and_skips_unplanned_states() {
        let mut machine = StateMachine::new();
        machine.advance(PipelineState::Scanning).unwrap();
        machine.advance(PipelineState::GeneratingHeaders).unwrap();
        machine.advance(PipelineState::Done).unwrap();
        assert_eq!(machine.state(), &PipelineState::Done);
        assert_eq!(machine.history().len(), 4);
    }

    #[test]
    fn rejects_backwards_and_reentry() {
        let mut machine = StateMachine::new();
        machine.advance(PipelineState::CompilingNative).unwrap();
        assert!(matches!(
            machine.advance(PipelineState::Scanning),
            Err(BridgeError::InvalidTransition { .. })
        ));
        assert!(machine.advance(PipelineState::CompilingNative).is_err());
    }

    #[test]
    fn failure_is_terminal() {
        let mut machine = StateMachine::new();
        machine.advance(PipelineState::Scanning).unwrap();
        machine.fail(Stage::Scan, "no sources").unwrap();
        assert!(machine.state().is_terminal());
        assert!(machine.advance(PipelineState::Done).is_err());
        assert!(machine.fail(Stage::Scan, "again").is_err());
    }

    #[test]
    fn done_cannot_fail() {
        let mut machine = StateMachine::new();
        machine.advance(PipelineState::Done).unwrap();
        let err = machine.fail(Stage::Run, "late").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid pipeline transition from done to failed"
        );
    }

    #[test]
    fn advance_cannot_be_used_to_fail() {
        let mut machine = StateMachine::new();
        let failed = PipelineState::Failed {
            stage: Stage::Scan,
            cause: "x".to_string(),
        };
        assert!(machine.advance(failed).is_err());
    }

    #[test]
    fn running_state_per_stage() {
        assert_eq!(
            PipelineState::running(Stage::CompileNative),
            PipelineState::CompilingNative
        );
        assert_eq!(PipelineState::running(Stage::Run), PipelineState::Launching);
    }
}
