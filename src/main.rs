//! Bridgewright CLI - JNI bridge build orchestrator
//!
//! Usage: bridgewright <COMMAND>
//!
//! Commands:
//!   scan     List native declarations
//!   headers  Scan and regenerate JNI headers
//!   check    Report stale headers
//!   build    Headers, native build, packaging
//!   run      Build, then launch the host
//!   plan     Print the stage order for a goal

mod commands;

use std::process::ExitCode;

use bridgewright::presentation::cli::Cli;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", format_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// `error: <top>` plus any causes not already part of the message
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let mut out = format!("error: {}", top);
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !top.contains(&cause) {
            out.push_str(&format!("\n  caused by: {}", cause));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgewright::application::PipelineFailure;
    use bridgewright::domain::services::Stage;
    use bridgewright::error::BridgeError;

    #[test]
    fn test_stage_failure_format() {
        let failure = PipelineFailure {
            stage: Some(Stage::CompileNative),
            error: BridgeError::NativeBuildFailure {
                step: bridgewright::domain::value_objects::NativeStep::Build,
                exit_code: Some(2),
                message: "undefined reference".to_string(),
            },
            completed: vec![Stage::Scan, Stage::GenerateHeaders],
        };
        let err = anyhow::Error::new(failure);
        assert_eq!(
            format_error(&err),
            "error: stage 'compile-native' failed: native build failed at build step \
             (exit code 2): undefined reference"
        );
    }

    #[test]
    fn test_context_cause_is_appended() {
        let err = anyhow::anyhow!("disk full").context("cannot write report");
        assert_eq!(
            format_error(&err),
            "error: cannot write report\n  caused by: disk full"
        );
    }
}
