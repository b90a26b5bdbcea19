//! Command handlers for the `bridgewright` binary

mod check;
mod context;
mod pipeline;
mod plan;
mod project_root;
mod scan;

use std::process::ExitCode;

use anyhow::Result;
use bridgewright::application::Goal;
use bridgewright::presentation::cli::{Cli, Commands};

use context::CommandContext;

/// Run one parsed invocation
pub fn dispatch(cli: Cli) -> Result<ExitCode> {
    let ctx = CommandContext::load(cli.config.as_deref(), cli.json, cli.verbose)?;

    match cli.command {
        Commands::Scan => scan::cmd_scan(&ctx)?,
        Commands::Headers => pipeline::cmd_pipeline(&ctx, Goal::Headers)?,
        Commands::Check => {
            if !check::cmd_check(&ctx)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Build => pipeline::cmd_pipeline(&ctx, Goal::Build)?,
        Commands::Run => pipeline::cmd_pipeline(&ctx, Goal::Run)?,
        Commands::Plan { goal } => plan::cmd_plan(&ctx, goal)?,
    }
    Ok(ExitCode::SUCCESS)
}
