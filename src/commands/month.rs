use anyhow::Result;
use chrono::Local;
use minical_core::YearMonth;
use minical_core::view::MonthView;

use crate::context::AppContext;
use crate::render::{Palette, render_month};

/// Which month to show, relative to `--year`/`--month` or the current month.
pub struct MonthArgs {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub next: bool,
    pub prev: bool,
}

pub fn run(ctx: &AppContext, args: MonthArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let target = resolve_month(&args, YearMonth::of(today))?;

    let events = ctx.events()?;
    let view = MonthView::build(target, ctx.week_start, events.as_slice())?;
    let palette = Palette::for_appearance(ctx.appearance()?);

    println!("{}", render_month(&view, palette, today));
    Ok(())
}

fn resolve_month(args: &MonthArgs, current: YearMonth) -> Result<YearMonth> {
    let base = YearMonth::new(
        args.year.unwrap_or(current.year()),
        args.month.unwrap_or(current.month()),
    )?;

    Ok(match (args.next, args.prev) {
        (true, false) => base.next(),
        (false, true) => base.prev(),
        _ => base,
    })
}
