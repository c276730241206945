use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use dialoguer::Input;
use log::info;
use minical_core::CalendarEvent;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::parse::{optional_text, parse_event_date};

pub fn run(
    ctx: &mut AppContext,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let event = match title {
        None => prompt_event(date, description)?,
        Some(title) => {
            build_event(title, date.as_deref(), description, Local::now().naive_local())?
        }
    };

    let mut events = ctx.events()?;
    let id = event.id();
    let when = event.date;
    events.add(event)?;
    ctx.save_events(&events)?;

    info!("Added event {}", id);
    println!("Event added successfully.");
    println!(
        "{}",
        format!("{} on {}", short_id(&id), when.format("%Y-%m-%d %H:%M")).dimmed()
    );
    Ok(())
}

/// An event from command-line flags. Without a date it starts at `now`.
fn build_event(
    title: String,
    date: Option<&str>,
    description: Option<String>,
    now: NaiveDateTime,
) -> Result<CalendarEvent> {
    let date = match date {
        Some(input) => parse_event_date(input)?,
        None => now,
    };
    Ok(CalendarEvent::new(title, date, description.and_then(optional_text)))
}

/// Ask for the fields of a new event, pre-filling anything given as a flag.
fn prompt_event(date: Option<String>, description: Option<String>) -> Result<CalendarEvent> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .allow_empty(true)
        .interact_text()?;

    let date = match date {
        Some(input) => parse_event_date(&input)?,
        None => prompt_date(Local::now().naive_local())?,
    };

    let description = match description {
        Some(text) => optional_text(text),
        None => optional_text(
            Input::<String>::new()
                .with_prompt("  Description (skip)")
                .allow_empty(true)
                .interact_text()?,
        ),
    };

    Ok(CalendarEvent::new(title, date, description))
}

/// Prompt for a date until it parses.
pub fn prompt_date(initial: NaiveDateTime) -> Result<NaiveDateTime> {
    let input: String = Input::new()
        .with_prompt("  When? (YYYY-MM-DD HH:MM)")
        .with_initial_text(initial.format("%Y-%m-%d %H:%M").to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_event_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    parse_event_date(&input)
}

pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string().chars().take(8).collect()
}
