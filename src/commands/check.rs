use anyhow::Result;
use bridgewright::application::{check_headers, HeaderDir};
use bridgewright::presentation::output::{check_json, render_check};

use super::context::CommandContext;

/// Returns whether the header directory is current
pub fn cmd_check(ctx: &CommandContext) -> Result<bool> {
    let prefix = ctx.config.package_prefix()?;
    let check = check_headers(
        &ctx.config.source_root(),
        &prefix,
        &HeaderDir::new(ctx.config.header_dir()),
    )?;

    if ctx.is_json() {
        println!("{}", check_json(&check));
    } else {
        print!("{}", render_check(&check, ctx.detailed()));
    }
    Ok(check.is_clean())
}
