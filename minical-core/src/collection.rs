//! The ordered event collection owned by an application session.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{CalError, CalResult};
use crate::event::CalendarEvent;

/// Events in insertion order. Ids are unique within a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventCollection {
    events: Vec<CalendarEvent>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from loaded events, dropping later duplicates of an id.
    pub fn from_events(events: Vec<CalendarEvent>) -> Self {
        let mut collection = EventCollection::new();
        for event in events {
            if collection.find(event.id()).is_some() {
                log::warn!("Dropping duplicate event id {}", event.id());
                continue;
            }
            collection.events.push(event);
        }
        collection
    }

    pub fn as_slice(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn find(&self, id: Uuid) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id() == id)
    }

    /// Append a new event.
    pub fn add(&mut self, event: CalendarEvent) -> CalResult<()> {
        if self.find(event.id()).is_some() {
            return Err(CalError::DuplicateEventId(event.id()));
        }
        self.events.push(event);
        Ok(())
    }

    /// Replace the event with the same id, keeping its position.
    /// Returns the previous version.
    pub fn replace(&mut self, event: CalendarEvent) -> CalResult<CalendarEvent> {
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id() == event.id())
            .ok_or_else(|| CalError::EventNotFound(event.id().to_string()))?;
        Ok(std::mem::replace(slot, event))
    }

    pub fn remove(&mut self, id: Uuid) -> CalResult<CalendarEvent> {
        let index = self
            .events
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| CalError::EventNotFound(id.to_string()))?;
        Ok(self.events.remove(index))
    }

    /// Resolve a full id or a unique, case-insensitive prefix of one.
    pub fn resolve_prefix(&self, text: &str) -> CalResult<Uuid> {
        let needle = text.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CalError::EventNotFound(text.to_string()));
        }

        let mut matches = self
            .events
            .iter()
            .map(CalendarEvent::id)
            .filter(|id| id.to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(CalError::AmbiguousEventId(text.to_string())),
            (None, _) => Err(CalError::EventNotFound(text.to_string())),
        }
    }
}

impl From<Vec<CalendarEvent>> for EventCollection {
    fn from(events: Vec<CalendarEvent>) -> Self {
        EventCollection::from_events(events)
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a CalendarEvent;
    type IntoIter = std::slice::Iter<'a, CalendarEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn id(text: &str) -> Uuid {
        Uuid::parse_str(text).unwrap()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut events = EventCollection::new();
        events.add(CalendarEvent::new("second day", noon(2), None)).unwrap();
        events.add(CalendarEvent::new("first day", noon(1), None)).unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["second day", "first day"]);
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut events = EventCollection::new();
        let event = CalendarEvent::new("a", noon(1), None);
        events.add(event.clone()).unwrap();
        assert!(matches!(
            events.add(event),
            Err(CalError::DuplicateEventId(_))
        ));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn replace_keeps_position_and_id() {
        let mut events = EventCollection::new();
        let a = CalendarEvent::new("a", noon(1), None);
        let b = CalendarEvent::new("b", noon(2), None);
        events.add(a.clone()).unwrap();
        events.add(b.clone()).unwrap();

        let edited = CalendarEvent::with_id(a.id(), "a (moved)", noon(5), Some("notes".into()));
        let previous = events.replace(edited).unwrap();

        assert_eq!(previous, a);
        assert_eq!(events.as_slice()[0].title, "a (moved)");
        assert_eq!(events.as_slice()[0].id(), a.id());
        assert_eq!(events.as_slice()[1], b);
    }

    #[test]
    fn replace_and_remove_unknown_ids_fail() {
        let mut events = EventCollection::new();
        let stray = CalendarEvent::new("stray", noon(1), None);
        assert!(matches!(
            events.replace(stray.clone()),
            Err(CalError::EventNotFound(_))
        ));
        assert!(matches!(
            events.remove(stray.id()),
            Err(CalError::EventNotFound(_))
        ));
    }

    #[test]
    fn remove_returns_event() {
        let mut events = EventCollection::new();
        let a = CalendarEvent::new("a", noon(1), None);
        events.add(a.clone()).unwrap();
        assert_eq!(events.remove(a.id()).unwrap(), a);
        assert!(events.is_empty());
    }

    #[test]
    fn resolve_prefix_variants() {
        let mut events = EventCollection::new();
        let first = id("aaaa1111-0000-4000-8000-000000000001");
        let second = id("aaaa2222-0000-4000-8000-000000000002");
        events.add(CalendarEvent::with_id(first, "one", noon(1), None)).unwrap();
        events.add(CalendarEvent::with_id(second, "two", noon(2), None)).unwrap();

        assert_eq!(events.resolve_prefix("AAAA1").unwrap(), first);
        assert_eq!(events.resolve_prefix(&second.to_string()).unwrap(), second);
        assert!(matches!(
            events.resolve_prefix("aaaa"),
            Err(CalError::AmbiguousEventId(_))
        ));
        assert!(matches!(
            events.resolve_prefix("ffff"),
            Err(CalError::EventNotFound(_))
        ));
        assert!(matches!(
            events.resolve_prefix(""),
            Err(CalError::EventNotFound(_))
        ));
    }

    #[test]
    fn from_events_drops_duplicates() {
        let a = CalendarEvent::new("a", noon(1), None);
        let collection = EventCollection::from_events(vec![a.clone(), a.clone()]);
        assert_eq!(collection.len(), 1);
    }
}
