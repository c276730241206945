use anyhow::Result;
use dialoguer::Input;
use minical_core::CalendarEvent;

use super::add::{prompt_date, short_id};
use crate::context::AppContext;
use crate::parse::{optional_text, parse_event_date};

/// Replace an event with an edited copy that keeps its id.
pub fn run(
    ctx: &mut AppContext,
    id: &str,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut events = ctx.events()?;
    let id = events.resolve_prefix(id)?;
    let existing = events
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Event {} disappeared while editing", id))?;

    let interactive = title.is_none() && date.is_none() && description.is_none();
    let edited = if interactive {
        prompt_edit(&existing)?
    } else {
        apply_edits(&existing, title, date, description)?
    };

    events.replace(edited)?;
    ctx.save_events(&events)?;

    println!("Event {} saved.", short_id(&id));
    Ok(())
}

fn apply_edits(
    existing: &CalendarEvent,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<CalendarEvent> {
    let date = match date {
        Some(input) => parse_event_date(&input)?,
        None => existing.date,
    };

    Ok(CalendarEvent::with_id(
        existing.id(),
        title.unwrap_or_else(|| existing.title.clone()),
        date,
        match description {
            Some(text) => optional_text(text),
            None => existing.description.clone(),
        },
    ))
}

/// The edit dialog: every field starts with the current value.
fn prompt_edit(existing: &CalendarEvent) -> Result<CalendarEvent> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .with_initial_text(existing.title.clone())
        .allow_empty(true)
        .interact_text()?;

    let date = prompt_date(existing.date)?;

    let description: String = Input::new()
        .with_prompt("  Description")
        .with_initial_text(existing.description_or_empty())
        .allow_empty(true)
        .interact_text()?;

    Ok(CalendarEvent::with_id(
        existing.id(),
        title,
        date,
        optional_text(description),
    ))
}
