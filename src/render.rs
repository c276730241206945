//! Terminal rendering of month views and events.
//!
//! Cell text is padded before it is colored so ANSI codes never disturb the
//! grid alignment.

use chrono::NaiveDate;
use minical_core::CalendarEvent;
use minical_core::theme::Appearance;
use minical_core::view::{DayCell, MonthView};
use owo_colors::OwoColorize;

/// Characters per grid cell, including the event marker.
const CELL_WIDTH: usize = 4;
const SHORT_ID_LEN: usize = 8;

/// Colors for one appearance, or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Light,
    Dark,
    Plain,
}

impl Palette {
    pub fn for_appearance(appearance: Appearance) -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            return Palette::Plain;
        }
        match appearance {
            Appearance::Light => Palette::Light,
            Appearance::Dark => Palette::Dark,
        }
    }

    fn heading(&self, text: &str) -> String {
        match self {
            Palette::Light => text.bold().blue().to_string(),
            Palette::Dark => text.bold().bright_cyan().to_string(),
            Palette::Plain => text.to_string(),
        }
    }

    fn event_day(&self, text: &str) -> String {
        match self {
            Palette::Light => text.white().on_blue().to_string(),
            Palette::Dark => text.black().on_bright_cyan().to_string(),
            Palette::Plain => text.to_string(),
        }
    }

    fn today(&self, text: &str) -> String {
        match self {
            Palette::Plain => text.to_string(),
            _ => text.bold().underline().to_string(),
        }
    }

    fn muted(&self, text: &str) -> String {
        match self {
            Palette::Plain => text.to_string(),
            _ => text.dimmed().to_string(),
        }
    }

    fn strong(&self, text: &str) -> String {
        match self {
            Palette::Plain => text.to_string(),
            _ => text.bold().to_string(),
        }
    }
}

/// Extension trait for terminal rendering.
pub trait Render {
    fn render(&self, palette: Palette) -> String;
}

impl Render for CalendarEvent {
    fn render(&self, palette: Palette) -> String {
        let time = self.date.format("%H:%M").to_string();
        let short_id: String = self.id().to_string().chars().take(SHORT_ID_LEN).collect();
        let title = if self.title.is_empty() {
            palette.muted("(untitled)")
        } else {
            self.title.clone()
        };

        let mut line = format!("{:>7}  {} {}", time, title, palette.muted(&format!("[{}]", short_id)));
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!("\n{:>9}{}", "", palette.muted(description)));
        }
        line
    }
}

/// A month grid followed by the month's events grouped by day.
pub fn render_month(view: &MonthView<'_>, palette: Palette, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    let title = format!("{} {}", view.month().name(), view.month().year());
    lines.push(palette.strong(&format!("{:^width$}", title, width = CELL_WIDTH * 7)));

    let header: String = view
        .headers()
        .iter()
        .map(|weekday| format!("{:>width$}", weekday.to_string(), width = CELL_WIDTH - 1) + " ")
        .collect();
    lines.push(palette.heading(header.trim_end()));

    for row in view.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(day) => render_cell(day, palette, today),
                None => " ".repeat(CELL_WIDTH),
            })
            .collect();
        lines.push(cells.concat().trim_end().to_string());
    }

    let days_with_events: Vec<&DayCell<'_>> =
        view.days().iter().filter(|d| !d.events.is_empty()).collect();

    lines.push(String::new());
    if days_with_events.is_empty() {
        lines.push(palette.muted("No events this month"));
    } else {
        for (index, day) in days_with_events.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.push(palette.strong(&format_date_label(day.date, today)));
            lines.extend(day.events.iter().map(|event| event.render(palette)));
        }
    }

    lines.join("\n")
}

fn render_cell(day: &DayCell<'_>, palette: Palette, today: NaiveDate) -> String {
    let number = format!("{:>width$}", day.date.format("%-d").to_string(), width = CELL_WIDTH - 1);
    let marker = if day.events.is_empty() { " " } else { "*" };

    let number = if !day.events.is_empty() {
        palette.event_day(&number)
    } else if day.date == today {
        palette.today(&number)
    } else {
        number
    };
    format!("{}{}", number, marker)
}

/// A list of events under a single day heading.
pub fn render_day(date: NaiveDate, events: &[&CalendarEvent], palette: Palette, today: NaiveDate) -> String {
    let mut lines = vec![palette.strong(&format_date_label(date, today))];
    if events.is_empty() {
        lines.push(palette.muted("  No events"));
    } else {
        lines.extend(events.iter().map(|event| event.render(palette)));
    }
    lines.join("\n")
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d, %Y").to_string(),
    }
}
