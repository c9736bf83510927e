//! Remembered-input maintenance.

use anyhow::Result;
use clap::Subcommand;
use utiliverse_core::AppContext;

use super::print_notice;

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Forget every remembered tool input (unit converter settings are kept)
    Clear,
}

pub fn run(ctx: &AppContext, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Clear => print_notice(ctx.clear_cache()?),
    }
    Ok(())
}
