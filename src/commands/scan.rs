use anyhow::Result;
use bridgewright::application::scan_declarations;
use bridgewright::presentation::output::{declarations_json, render_declarations};

use super::context::CommandContext;

pub fn cmd_scan(ctx: &CommandContext) -> Result<()> {
    let prefix = ctx.config.package_prefix()?;
    let scan = scan_declarations(&ctx.config.source_root(), &prefix)?;

    if ctx.is_json() {
        println!("{}", declarations_json(&scan.declarations));
    } else {
        print!("{}", render_declarations(&scan.declarations, ctx.detailed()));
    }
    Ok(())
}
