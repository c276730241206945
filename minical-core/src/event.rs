//! Calendar event type and its persisted shape.
//!
//! Events are stored with PascalCase keys (`Id`, `Title`, `Date`,
//! `Description`). `Date` is a wall-clock timestamp without offset; an RFC 3339
//! value carrying an offset is accepted on load and reduced to its local time.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A scheduled item on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarEvent {
    id: Uuid,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Wall-clock start time; only the date part places the event on the grid.
    #[serde(with = "wall_clock")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Create an event with a freshly generated id.
    pub fn new(title: impl Into<String>, date: NaiveDateTime, description: Option<String>) -> Self {
        CalendarEvent {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            description,
        }
    }

    /// Create an event with a known id, e.g. when rebuilding an edited event.
    pub fn with_id(
        id: Uuid,
        title: impl Into<String>,
        date: NaiveDateTime,
        description: Option<String>,
    ) -> Self {
        CalendarEvent {
            id,
            title: title.into(),
            date,
            description,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Calendar-date component of `date`.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod wall_clock {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid event date '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn new_events_get_distinct_ids() {
        let a = CalendarEvent::new("A", at(2024, 3, 15, 10, 0), None);
        let b = CalendarEvent::new("A", at(2024, 3, 15, 10, 0), None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn serializes_with_pascal_case_keys() {
        let id = Uuid::parse_str("6f1c0a52-3a7e-4c1b-9a57-2d0c7c1f9e10").unwrap();
        let event = CalendarEvent::with_id(id, "Dentist", at(2024, 3, 15, 10, 0), None);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["Id"], "6f1c0a52-3a7e-4c1b-9a57-2d0c7c1f9e10");
        assert_eq!(json["Title"], "Dentist");
        assert_eq!(json["Date"], "2024-03-15T10:00:00");
        assert!(json["Description"].is_null());
    }

    #[test]
    fn deserializes_nulls_and_fractional_seconds() {
        let json = r#"{
            "Id": "6f1c0a52-3a7e-4c1b-9a57-2d0c7c1f9e10",
            "Title": null,
            "Date": "2024-03-15T10:00:00.5",
            "Description": null
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "");
        assert_eq!(event.description, None);
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn offset_dates_keep_their_wall_clock_time() {
        let parsed = wall_clock::parse("2024-03-15T10:00:00+02:00").unwrap();
        assert_eq!(parsed, at(2024, 3, 15, 10, 0));
    }

    #[test]
    fn rejects_garbage_dates() {
        let json = r#"{"Id":"6f1c0a52-3a7e-4c1b-9a57-2d0c7c1f9e10","Title":"x","Date":"tomorrow"}"#;
        assert!(serde_json::from_str::<CalendarEvent>(json).is_err());
    }
}
