//! Core of the minical calendar.
//!
//! - `layout`: month-grid positions for any week-start day
//! - `query` and `view`: per-day event subsets and the composed month view
//! - `ics`: iCalendar export
//! - `settings` and `config`: persisted events/theme and user configuration

pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod layout;
pub mod query;
pub mod settings;
pub mod theme;
pub mod view;

pub use collection::EventCollection;
pub use error::{CalError, CalResult};
pub use event::CalendarEvent;
pub use layout::{CellPosition, MonthGrid, YearMonth, compute_month_grid};
pub use query::filter_events_for_day;
pub use theme::Theme;
