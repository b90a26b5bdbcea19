use anyhow::Result;
use bridgewright::application::Goal;
use bridgewright::presentation::create_pipeline_use_case;
use bridgewright::presentation::output::{plan_json, render_plan};

use super::context::CommandContext;

pub fn cmd_plan(ctx: &CommandContext, goal: Goal) -> Result<()> {
    let plan = create_pipeline_use_case(&ctx.config).plan(goal);
    if ctx.is_json() {
        println!("{}", plan_json(goal.as_str(), &plan));
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}
