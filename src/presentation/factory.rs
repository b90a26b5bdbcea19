//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::time::Duration;

use crate::application::PipelineUseCase;
use crate::config::{Config, Verbosity};
use crate::domain::ports::{NoopEventSink, PipelineEventSink};
use crate::infrastructure::{ConsoleEventSink, JsonEventSink, ProcessCommandRunner, ProcessToolchain};

/// Type alias for the concrete PipelineUseCase with all dependencies
pub type ConcretePipelineUseCase =
    PipelineUseCase<ProcessToolchain<ProcessCommandRunner>, ProcessCommandRunner>;

/// Create a pipeline use case running the configured native commands
pub fn create_pipeline_use_case(config: &Config) -> ConcretePipelineUseCase {
    let toolchain = ProcessToolchain::new(
        ProcessCommandRunner::new(),
        config.native.configure.clone(),
        config.native.build.clone(),
    )
    .with_timeout(config.native.timeout_secs.map(Duration::from_secs));

    PipelineUseCase::new(toolchain, ProcessCommandRunner::new())
}

/// Pick the event sink for the output mode
pub fn create_event_sink(json: bool, verbosity: Verbosity) -> Box<dyn PipelineEventSink> {
    if json {
        Box::new(JsonEventSink::stdout())
    } else if verbosity == Verbosity::Quiet {
        Box::new(NoopEventSink)
    } else {
        Box::new(ConsoleEventSink::stderr(verbosity >= Verbosity::Verbose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Goal;
    use crate::domain::services::Stage;

    #[test]
    fn test_create_pipeline_use_case_plans_full_graph() {
        let use_case = create_pipeline_use_case(&Config::default());
        assert_eq!(use_case.plan(Goal::Run).len(), 6);
        assert_eq!(use_case.plan(Goal::Headers).last(), Some(&Stage::GenerateHeaders));
    }
}
