//! Read-only event queries.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::event::CalendarEvent;
use crate::layout::YearMonth;

/// Events whose date falls on `day`, ignoring time of day. Input order is kept.
pub fn filter_events_for_day<'a, I>(events: I, day: NaiveDate) -> Vec<&'a CalendarEvent>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    events.into_iter().filter(|e| e.day() == day).collect()
}

/// Events of one month keyed by day of month. Each day keeps input order.
pub fn events_by_day<'a, I>(events: I, month: YearMonth) -> BTreeMap<u32, Vec<&'a CalendarEvent>>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut by_day: BTreeMap<u32, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        let day = event.day();
        if YearMonth::of(day) == month {
            by_day.entry(day.day()).or_default().push(event);
        }
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("late", at(2024, 3, 15, 23), None),
            CalendarEvent::new("other day", at(2024, 3, 16, 0), None),
            CalendarEvent::new("early", at(2024, 3, 15, 0), None),
            CalendarEvent::new("next year", at(2025, 3, 15, 9), None),
            CalendarEvent::new("next month", at(2024, 4, 1, 9), None),
        ]
    }

    #[test]
    fn filter_ignores_time_of_day_and_keeps_order() {
        let events = sample();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let titles: Vec<_> = filter_events_for_day(&events, day)
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["late", "early"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let events = sample();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let once = filter_events_for_day(&events, day);
        let twice = filter_events_for_day(once.iter().copied(), day);
        assert_eq!(once, twice);
        assert!(twice.iter().all(|e| e.day() == day));
    }

    #[test]
    fn filter_on_empty_day_is_empty() {
        let events = sample();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(filter_events_for_day(&events, day).is_empty());
    }

    #[test]
    fn group_by_day_within_month() {
        let events = sample();
        let march = YearMonth::new(2024, 3).unwrap();
        let grouped = events_by_day(&events, march);

        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), [15, 16]);
        assert_eq!(grouped[&15].len(), 2);
        assert_eq!(grouped[&15][0].title, "late");
        assert_eq!(grouped[&16][0].title, "other day");
    }
}
