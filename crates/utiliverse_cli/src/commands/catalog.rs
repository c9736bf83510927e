//! Listing page commands: `list`, `search` and `show`.

use anyhow::{bail, Result};
use utiliverse_core::{AppContext, ToolDescriptor};

pub fn list(ctx: &AppContext) -> Result<()> {
    print_rows(ctx.catalog().tools().iter());
    Ok(())
}

pub fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let matches = ctx.search_index().filter(query);
    if matches.is_empty() {
        println!("No tools found.");
        return Ok(());
    }
    print_rows(matches.into_iter());
    Ok(())
}

/// Tool header; accepts an id or a `/tools/<id>` route.
pub fn show(ctx: &AppContext, id_or_route: &str) -> Result<()> {
    let Some(tool) = ctx
        .tool(id_or_route)
        .or_else(|| ctx.catalog().resolve_route(id_or_route))
    else {
        bail!("unknown tool `{id_or_route}`; run `utiliverse list` to see available tools");
    };

    println!("{}", tool.title);
    println!("{}", tool.description);
    println!();
    println!("tags:   {}", tool.tags.join(", "));
    println!("route:  {}", tool.route());
    println!("source: {}", tool.source);
    Ok(())
}

fn print_rows<'a>(tools: impl Iterator<Item = &'a ToolDescriptor>) {
    for tool in tools {
        println!("{:<20} {}", tool.id, tool.title);
    }
}
