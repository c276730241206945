//! ICS text generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use icalendar::{Calendar, Component};

use super::{EVENT_DURATION_HOURS, ExportOptions, format_utc, to_utc};
use crate::event::CalendarEvent;

/// UTC start and end of an exported event.
fn event_span<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = to_utc(event.date, tz);
    (start, start + Duration::hours(EVENT_DURATION_HOURS))
}

/// Serialize events into an iCalendar document, one VEVENT per event in input order.
///
/// Lines end with `\n`. Values are written verbatim: no escaping of `,` `;` or
/// newlines and no line folding. Use [`export_rfc5545`] for conformant output.
pub fn export_to_icalendar<Tz: TimeZone>(
    events: &[CalendarEvent],
    tz: &Tz,
    now: DateTime<Utc>,
    options: &ExportOptions,
) -> String {
    let dtstamp = format_utc(&now);
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        format!("PRODID:{}", options.prodid()),
    ];

    for event in events {
        let (start, end) = event_span(event, tz);
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}", options.uid(event.id())));
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!("DTSTART:{}", format_utc(&start)));
        lines.push(format!("DTEND:{}", format_utc(&end)));
        lines.push(format!("SUMMARY:{}", event.title));
        lines.push(format!("DESCRIPTION:{}", event.description_or_empty()));
        lines.push("END:VEVENT".into());
    }

    lines.push("END:VCALENDAR".into());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Serialize events through the `icalendar` crate: CRLF line endings, escaped
/// text values and folded long lines.
pub fn export_rfc5545<Tz: TimeZone>(
    events: &[CalendarEvent],
    tz: &Tz,
    now: DateTime<Utc>,
    options: &ExportOptions,
) -> String {
    let dtstamp = format_utc(&now);
    let mut cal = Calendar::new();

    for event in events {
        let (start, end) = event_span(event, tz);

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&options.uid(event.id()));
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.add_property("DTSTART", format_utc(&start));
        ics_event.add_property("DTEND", format_utc(&end));
        ics_event.summary(&event.title);
        if let Some(ref description) = event.description {
            ics_event.description(description);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    rewrite_calendar_header(&cal.to_string(), &options.prodid())
}

/// Replace the crate's PRODID with ours and drop CALSCALE:GREGORIAN (the default).
fn rewrite_calendar_header(ics: &str, prodid: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prodid);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    const ID: &str = "6f1c0a52-3a7e-4c1b-9a57-2d0c7c1f9e10";

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn make_test_event() -> CalendarEvent {
        CalendarEvent::with_id(
            Uuid::parse_str(ID).unwrap(),
            "Dentist",
            at(2024, 3, 15, 10, 0),
            Some("Bring the forms".to_string()),
        )
    }

    #[test]
    fn empty_calendar_is_header_and_footer_only() {
        let ics = export_to_icalendar(&[], &Utc, stamp(), &ExportOptions::default());
        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//minical//Mini Calendar//EN\nEND:VCALENDAR\n"
        );
    }

    #[test]
    fn event_block_layout() {
        let ics = export_to_icalendar(
            &[make_test_event()],
            &Utc,
            stamp(),
            &ExportOptions::default(),
        );

        let expected = format!(
            "BEGIN:VCALENDAR\n\
             VERSION:2.0\n\
             PRODID:-//minical//Mini Calendar//EN\n\
             BEGIN:VEVENT\n\
             UID:{ID}@minical.local\n\
             DTSTAMP:20240102T030405Z\n\
             DTSTART:20240315T100000Z\n\
             DTEND:20240315T110000Z\n\
             SUMMARY:Dentist\n\
             DESCRIPTION:Bring the forms\n\
             END:VEVENT\n\
             END:VCALENDAR\n"
        );
        assert_eq!(ics, expected);
    }

    #[test]
    fn dtend_is_one_hour_after_dtstart_across_midnight() {
        let mut event = make_test_event();
        event.date = at(2024, 12, 31, 23, 30);
        let ics = export_to_icalendar(&[event], &Utc, stamp(), &ExportOptions::default());

        assert!(ics.contains("DTSTART:20241231T233000Z\n"));
        assert!(ics.contains("DTEND:20250101T003000Z\n"));
    }

    #[test]
    fn local_dates_are_converted_to_utc() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let ics = export_to_icalendar(
            &[make_test_event()],
            &minus_five,
            stamp(),
            &ExportOptions::default(),
        );
        assert!(ics.contains("DTSTART:20240315T150000Z\n"));
        assert!(ics.contains("DTEND:20240315T160000Z\n"));
    }

    #[test]
    fn events_keep_input_order_and_custom_identity() {
        let first = CalendarEvent::new("first", at(2024, 5, 2, 9, 0), None);
        let second = CalendarEvent::new("second", at(2024, 5, 1, 9, 0), None);
        let options = ExportOptions {
            product_id: "Example Corp//Planner".to_string(),
            uid_domain: "example.com".to_string(),
        };
        let ics = export_to_icalendar(&[first.clone(), second.clone()], &Utc, stamp(), &options);

        assert!(ics.contains("PRODID:-//Example Corp//Planner//EN\n"));
        assert!(ics.contains(&format!("UID:{}@example.com\n", first.id())));

        let first_at = ics.find("SUMMARY:first").unwrap();
        let second_at = ics.find("SUMMARY:second").unwrap();
        assert!(first_at < second_at);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        // Missing description still produces the property
        assert_eq!(ics.matches("DESCRIPTION:\n").count(), 2);
    }

    #[test]
    fn plain_export_writes_values_verbatim() {
        let mut event = make_test_event();
        event.title = "Lunch, then coffee; maybe".to_string();
        let ics = export_to_icalendar(&[event], &Utc, stamp(), &ExportOptions::default());
        assert!(ics.contains("SUMMARY:Lunch, then coffee; maybe\n"));
    }

    #[test]
    fn rfc5545_export_uses_crlf_and_our_identity() {
        let ics = export_rfc5545(
            &[make_test_event()],
            &Utc,
            stamp(),
            &ExportOptions::default(),
        );

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "ICS:\n{}", ics);
        assert!(ics.ends_with("END:VCALENDAR\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("PRODID:-//minical//Mini Calendar//EN\r\n"));
        assert!(!ics.contains("CALSCALE"));
        assert!(ics.contains(&format!("UID:{ID}@minical.local\r\n")));
        assert!(ics.contains("DTSTAMP:20240102T030405Z\r\n"));
        assert!(ics.contains("DTSTART:20240315T100000Z\r\n"));
        assert!(ics.contains("DTEND:20240315T110000Z\r\n"));
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn rfc5545_export_of_nothing_has_no_events() {
        let ics = export_rfc5545(&[], &Utc, stamp(), &ExportOptions::default());
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
