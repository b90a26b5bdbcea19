//! Pipeline Use Case
//!
//! Runs the planned stages of the bridge pipeline in order:
//! 1. Scan the Java sources for native declarations
//! 2. Regenerate the JNI headers
//! 3. Compile the managed sources (optional)
//! 4. Configure and build the native library
//! 5. Package the library into the resource bundle
//! 6. Launch the host
//!
//! Stage logic lives in the sibling stage modules; this is orchestration only.
//! The first failing stage aborts the run.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::header_generator::generate_headers;
use crate::application::native_build::compile_native;
use crate::application::packager::{artifact_candidate, package_artifact};
use crate::application::scanner::scan_declarations;
use crate::domain::entities::{BuildArtifact, DeclarationSet, PackagedResource};
use crate::domain::ports::{
    CommandRunner, CommandSpec, NativeToolchain, PipelineEvent, PipelineEventSink,
    ToolchainFailure,
};
use crate::domain::services::{Stage, StageArtifact, StageGraph};
use crate::error::{BridgeError, BridgeResult};
use crate::infrastructure::toolchain::HEADER_DIR_ENV;

use super::options::{Goal, PipelineOptions};
use super::result::{PipelineFailure, PipelineReport, StageOutcome, StageRecord};
use super::state::{PipelineState, StateMachine};
use super::workspace::Workspace;

/// Data handed between stages within one run
#[derive(Default)]
struct RunContext {
    declarations: Option<DeclarationSet>,
    artifact: Option<BuildArtifact>,
}

/// Pipeline use case, parameterized by its external command ports
pub struct PipelineUseCase<T, R>
where
    T: NativeToolchain,
    R: CommandRunner,
{
    toolchain: T,
    runner: R,
    graph: StageGraph,
}

impl<T, R> PipelineUseCase<T, R>
where
    T: NativeToolchain,
    R: CommandRunner,
{
    pub fn new(toolchain: T, runner: R) -> Self {
        Self {
            toolchain,
            runner,
            graph: StageGraph::standard(),
        }
    }

    /// Stages a goal runs, in execution order
    pub fn plan(&self, goal: Goal) -> Vec<Stage> {
        self.graph.plan_for(goal.targets())
    }

    /// Run the stages needed for `goal`
    pub fn execute(
        &self,
        options: &PipelineOptions,
        goal: Goal,
        events: &dyn PipelineEventSink,
    ) -> Result<PipelineReport, PipelineFailure> {
        let _workspace =
            Workspace::open(&options.project_root).map_err(PipelineFailure::before_start)?;

        let plan = self.plan(goal);
        info!(goal = %goal, stages = plan.len(), "pipeline started");
        events.on_event(PipelineEvent::Started {
            goal: goal.as_str().to_string(),
            plan: plan.clone(),
        });

        let mut report = PipelineReport::new(goal, Utc::now());
        let mut machine = StateMachine::new();
        let mut ctx = RunContext::default();
        let mut completed = Vec::new();

        for stage in plan {
            let started_at = Utc::now();
            let outcome = machine
                .advance(PipelineState::running(stage))
                .and_then(|()| {
                    info!(stage = %stage, "stage started");
                    events.on_event(PipelineEvent::StageStarted { stage });
                    self.run_stage(stage, options, &mut ctx, &mut report, events)
                });

            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(stage = %stage, error = %error, "stage failed");
                    if let Err(e) = machine.fail(stage, error.to_string()) {
                        warn!(error = %e, "could not record failure state");
                    }
                    events.on_event(PipelineEvent::Failed {
                        stage,
                        error: error.to_string(),
                    });
                    return Err(PipelineFailure {
                        stage: Some(stage),
                        error,
                        completed,
                    });
                }
            };

            match &outcome {
                StageOutcome::Completed => {
                    info!(stage = %stage, "stage completed");
                    events.on_event(PipelineEvent::StageCompleted { stage });
                    completed.push(stage);
                }
                StageOutcome::Skipped { reason } => {
                    info!(stage = %stage, reason = %reason, "stage skipped");
                    events.on_event(PipelineEvent::StageSkipped {
                        stage,
                        reason: reason.clone(),
                    });
                }
            }
            report.stages.push(StageRecord {
                stage,
                outcome,
                started_at,
                finished_at: Utc::now(),
            });
        }

        machine
            .advance(PipelineState::Done)
            .map_err(PipelineFailure::before_start)?;
        report.finished_at = Utc::now();
        info!(goal = %goal, elapsed_ms = report.elapsed_ms(), "pipeline finished");
        events.on_event(PipelineEvent::Completed {
            stages: completed.len(),
        });
        Ok(report)
    }

    fn run_stage(
        &self,
        stage: Stage,
        options: &PipelineOptions,
        ctx: &mut RunContext,
        report: &mut PipelineReport,
        events: &dyn PipelineEventSink,
    ) -> BridgeResult<StageOutcome> {
        match stage {
            Stage::Scan => {
                let scan = scan_declarations(&options.source_root, &options.prefix)?;
                events.on_event(PipelineEvent::DeclarationsScanned {
                    files: scan.files.len(),
                    declarations: scan.declarations.len(),
                });
                report.declarations = scan.declarations.len();
                ctx.declarations = Some(scan.declarations);
            }
            Stage::GenerateHeaders => {
                let declarations = ctx
                    .declarations
                    .as_ref()
                    .ok_or_else(|| missing_input(stage, StageArtifact::Declarations))?;
                let generation = generate_headers(&options.header_dir, declarations, events)?;
                report.headers = generation.headers;
                report.deleted_headers = generation.deleted;
            }
            Stage::CompileManaged => return self.compile_managed(options),
            Stage::CompileNative => {
                let artifact = compile_native(&self.toolchain, &options.native, events)?;
                ctx.artifact = Some(artifact.clone());
                report.artifact = Some(artifact);
            }
            Stage::Package => {
                let artifact = ctx
                    .artifact
                    .as_ref()
                    .ok_or_else(|| missing_input(stage, StageArtifact::NativeLibrary))?;
                let outcome = package_artifact(
                    &options.bundle,
                    bundle_candidates(options, artifact),
                    options.policy,
                    events,
                )?;
                report.packaged = outcome.packaged;
                report.dropped = outcome.dropped;
            }
            Stage::Run => {
                self.launch_host(options)?;
            }
        }
        Ok(StageOutcome::Completed)
    }

    fn compile_managed(&self, options: &PipelineOptions) -> BridgeResult<StageOutcome> {
        let Some(spec) = CommandSpec::from_argv(&options.managed_compile, &options.project_root)
        else {
            return Ok(StageOutcome::Skipped {
                reason: "no managed.compile command configured".to_string(),
            });
        };
        let spec = spec
            .with_env(HEADER_DIR_ENV, path_arg(options.header_dir.path()))
            .with_timeout(options.timeout);
        info!(command = %spec.display(), "compiling managed sources");
        self.runner
            .run(&spec)
            .map_err(|f| BridgeError::ManagedCompileFailure {
                exit_code: f.exit_code,
                message: f.message,
            })?;
        Ok(StageOutcome::Completed)
    }

    /// Start the host attached to the terminal and wait for it to exit
    fn launch_host(&self, options: &PipelineOptions) -> BridgeResult<()> {
        let argv = host_argv(options);
        let spec = CommandSpec::from_argv(&argv, &options.project_root).ok_or_else(|| {
            launch_failure(ToolchainFailure::other("host.run is not configured"))
        })?;
        info!(command = %spec.display(), "launching host");
        self.runner.launch(&spec).map_err(launch_failure)
    }
}

/// Configured includes first (file order), then the built library
fn bundle_candidates(options: &PipelineOptions, artifact: &BuildArtifact) -> Vec<PackagedResource> {
    let mut candidates: Vec<PackagedResource> = options
        .includes
        .iter()
        .map(|include| {
            let origin = include
                .source
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            PackagedResource::new(
                include.path.clone(),
                BuildArtifact::new(origin, include.source.clone(), artifact.target_platform_tag),
            )
        })
        .collect();
    candidates.push(artifact_candidate(artifact, &options.resource_dir));
    candidates
}

/// `host.run` with `{main_class}` and `{resources}` substituted
fn host_argv(options: &PipelineOptions) -> Vec<String> {
    let resources = path_arg(options.bundle.root());
    options
        .host_run
        .iter()
        .map(|arg| {
            arg.replace("{main_class}", &options.main_class)
                .replace("{resources}", &resources)
        })
        .collect()
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn launch_failure(failure: ToolchainFailure) -> BridgeError {
    BridgeError::LaunchFailure {
        exit_code: failure.exit_code,
        message: failure.message,
    }
}

fn missing_input(stage: Stage, input: StageArtifact) -> BridgeError {
    BridgeError::InvalidStageGraph {
        message: format!("'{}' ran without {:?}", stage, input),
    }
}
