use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use log::info;
use minical_core::CalendarEvent;
use minical_core::config::MinicalConfig;
use minical_core::ics::{ExportOptions, export_rfc5545, export_to_icalendar, write_ics};

use crate::context::AppContext;

pub const DEFAULT_EXPORT_FILE: &str = "events.ics";

pub fn run(ctx: &AppContext, path: Option<PathBuf>, strict: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    let events = ctx.events()?;

    let ics = export_text(&ctx.config, events.as_slice(), strict, Utc::now())?;

    write_export(&path, &ics)?;
    info!("Exported {} events to {}", events.len(), path.display());
    println!("Events exported successfully.");
    Ok(())
}

/// Calendar text in the configured zone, or system local time when none is set.
fn export_text(
    config: &MinicalConfig,
    events: &[CalendarEvent],
    strict: bool,
    now: DateTime<Utc>,
) -> Result<String> {
    let options = config.export_options();
    Ok(match config.time_zone()? {
        Some(tz) => render(events, &tz, now, &options, strict),
        None => render(events, &Local, now, &options, strict),
    })
}

fn render<Tz: TimeZone>(
    events: &[CalendarEvent],
    tz: &Tz,
    now: DateTime<Utc>,
    options: &ExportOptions,
    strict: bool,
) -> String {
    if strict {
        export_rfc5545(events, tz, now, options)
    } else {
        export_to_icalendar(events, tz, now, options)
    }
}

fn write_export(path: &Path, ics: &str) -> Result<()> {
    write_ics(path, ics).with_context(|| format!("Failed to write {}", path.display()))
}
