use anyhow::Result;

use super::add::short_id;
use crate::context::AppContext;

pub fn run(ctx: &mut AppContext, id: &str) -> Result<()> {
    let mut events = ctx.events()?;
    let id = events.resolve_prefix(id)?;
    let removed = events.remove(id)?;
    ctx.save_events(&events)?;

    println!("Removed {} ({})", removed.title, short_id(&id));
    Ok(())
}
