//! Pipeline Module
//!
//! Orchestrates one bridge run over an explicit, validated stage graph.
//!
//! ## Structure
//!
//! - `options` - Resolved directory handles and commands (`PipelineOptions`, `Goal`)
//! - `result` - Run report and failure types
//! - `state` - Forward-only run state machine
//! - `workspace` - Run lock scope
//! - `use_case` - Core orchestration (`PipelineUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use bridgewright::application::pipeline::{Goal, PipelineOptions, PipelineUseCase};
//!
//! let use_case = PipelineUseCase::new(toolchain, runner);
//! let report = use_case.execute(&PipelineOptions::from_config(&config)?, Goal::Build, &sink)?;
//! ```

mod options;
mod result;
mod state;
mod use_case;
mod workspace;

pub use options::{Goal, IncludeCandidate, PipelineOptions};
pub use result::{PipelineFailure, PipelineReport, StageOutcome, StageRecord};
pub use state::{PipelineState, StateMachine};
pub use use_case::PipelineUseCase;
pub use workspace::Workspace;
