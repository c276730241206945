//! iCalendar export.
//!
//! Event dates are wall-clock times. They are converted to UTC through the
//! time zone the caller supplies, since every timestamp in the exported
//! document carries the `Z` suffix.

mod generate;

pub use generate::{export_rfc5545, export_to_icalendar};

use std::path::Path;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};

use crate::error::CalResult;

pub const DEFAULT_PRODUCT_ID: &str = "minical//Mini Calendar";
pub const DEFAULT_UID_DOMAIN: &str = "minical.local";

/// Fixed length of every exported event.
pub const EVENT_DURATION_HOURS: i64 = 1;

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Identity written into exported calendars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Rendered as `PRODID:-//<product_id>//EN`
    pub product_id: String,
    /// Rendered as `UID:<event id>@<uid_domain>`
    pub uid_domain: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

impl ExportOptions {
    fn prodid(&self) -> String {
        format!("-//{}//EN", self.product_id)
    }

    fn uid(&self, id: uuid::Uuid) -> String {
        format!("{}@{}", id, self.uid_domain)
    }
}

/// Interpret a wall-clock time in `tz` and convert it to UTC.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant. Times
/// that do not exist (clocks turned forward) are moved one hour later.
pub fn to_utc<Tz: TimeZone>(date: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&date) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(date + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&date)),
    }
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(UTC_FORMAT).to_string()
}

/// Write exported text to `path`.
pub fn write_ics(path: &Path, ics: &str) -> CalResult<()> {
    std::fs::write(path, ics)?;
    log::info!("Wrote {} bytes of iCalendar data to {}", ics.len(), path.display());
    Ok(())
}
