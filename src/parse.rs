//! Parsing of dates typed on the command line.

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an event start such as `2024-03-15`, `2024-03-15T10:00` or `2024-03-15 10:00`.
/// A bare date starts at midnight.
pub fn parse_event_date(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    parse_day(input).map(|d| d.and_time(NaiveTime::MIN)).map_err(|_| {
        anyhow!(
            "Invalid date '{}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or YYYY-MM-DD HH:MM",
            input
        )
    })
}

/// Parse a calendar day: `YYYY-MM-DD`, `today` or `tomorrow`.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today
            .succ_opt()
            .ok_or_else(|| anyhow!("No date after {}", today)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", input)),
    }
}

/// Empty strings mean "no description".
pub fn optional_text(input: String) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input)
    }
}
