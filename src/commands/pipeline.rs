//! `headers`, `build` and `run`

use anyhow::Result;
use bridgewright::application::{Goal, PipelineOptions};
use bridgewright::presentation::output::{render_report, report_json};
use bridgewright::presentation::{create_event_sink, create_pipeline_use_case};

use super::context::CommandContext;

pub fn cmd_pipeline(ctx: &CommandContext, goal: Goal) -> Result<()> {
    let options = PipelineOptions::from_config(&ctx.config)?;
    let events = create_event_sink(ctx.is_json(), ctx.verbosity);
    let use_case = create_pipeline_use_case(&ctx.config);

    let report = use_case.execute(&options, goal, events.as_ref())?;

    if ctx.is_json() {
        println!("{}", report_json(&report));
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}
