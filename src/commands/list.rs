use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::render::{Palette, Render};

/// Print every stored event in insertion order.
pub fn run(ctx: &AppContext, json: bool) -> Result<()> {
    let events = ctx.events()?;

    if json {
        let text =
            serde_json::to_string_pretty(&events).context("Failed to serialize events")?;
        println!("{}", text);
        return Ok(());
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let palette = Palette::for_appearance(ctx.appearance()?);
    for event in &events {
        println!("{}  {}", event.date.format("%Y-%m-%d"), event.render(palette).trim_start());
    }

    Ok(())
}
