use anyhow::Result;
use chrono::Local;
use minical_core::filter_events_for_day;

use crate::context::AppContext;
use crate::parse::parse_day;
use crate::render::{Palette, render_day};

pub fn run(ctx: &AppContext, date: Option<String>) -> Result<()> {
    let today = Local::now().date_naive();
    let day = match date {
        Some(input) => parse_day(&input)?,
        None => today,
    };

    let events = ctx.events()?;
    let on_day = filter_events_for_day(&events, day);
    let palette = Palette::for_appearance(ctx.appearance()?);

    println!("{}", render_day(day, &on_day, palette, today));
    Ok(())
}
