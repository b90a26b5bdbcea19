//! Native Compiler/Linker stage
//!
//! Runs the toolchain's configure step, then its build step, and checks that
//! the promised library actually exists.

use std::fs;
use std::io;

use tracing::{debug, info};

use crate::domain::entities::BuildArtifact;
use crate::domain::ports::{
    NativeDirs, NativeToolchain, PipelineEvent, PipelineEventSink, ToolchainFailure,
};
use crate::domain::value_objects::NativeStep;
use crate::error::{BridgeError, BridgeResult};

fn step_failure(step: NativeStep, failure: ToolchainFailure) -> BridgeError {
    BridgeError::NativeBuildFailure {
        step,
        exit_code: failure.exit_code,
        message: failure.message,
    }
}

/// Configure and build the native library.
///
/// `build` never runs if `configure` failed. A leftover library from a
/// previous run is removed first, so a silently failing build cannot be
/// mistaken for a fresh one.
pub fn compile_native<T: NativeToolchain + ?Sized>(
    toolchain: &T,
    dirs: &NativeDirs,
    events: &dyn PipelineEventSink,
) -> BridgeResult<BuildArtifact> {
    match fs::remove_file(dirs.artifact_path()) {
        Ok(()) => debug!(artifact = %dirs.artifact_path().display(), "removed stale artifact"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(step_failure(
                NativeStep::Build,
                ToolchainFailure::other(format!(
                    "cannot remove stale artifact {}: {}",
                    dirs.artifact_path().display(),
                    e
                )),
            ))
        }
    }

    let command = toolchain.describe();

    info!(step = %NativeStep::Configure, toolchain = %command, "native step started");
    events.on_event(PipelineEvent::NativeStepStarted {
        step: NativeStep::Configure,
        command: command.clone(),
    });
    toolchain
        .configure(dirs)
        .map_err(|f| step_failure(NativeStep::Configure, f))?;
    events.on_event(PipelineEvent::NativeStepFinished {
        step: NativeStep::Configure,
    });

    info!(step = %NativeStep::Build, toolchain = %command, "native step started");
    events.on_event(PipelineEvent::NativeStepStarted {
        step: NativeStep::Build,
        command,
    });
    let built = toolchain
        .build(dirs)
        .map_err(|f| step_failure(NativeStep::Build, f))?;
    if !built.is_file() {
        return Err(step_failure(
            NativeStep::Build,
            ToolchainFailure::other(format!(
                "build reported success but {} does not exist",
                built.display()
            )),
        ));
    }
    events.on_event(PipelineEvent::NativeStepFinished {
        step: NativeStep::Build,
    });

    Ok(BuildArtifact::new(
        dirs.source_dir().to_path_buf(),
        built,
        dirs.platform,
    ))
}
