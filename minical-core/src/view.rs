//! Month view: grid positions joined with the events of each day.
//!
//! A renderer asks for a [`MonthView`] and draws it; it never computes
//! positions or filters events itself.

use chrono::{NaiveDate, Weekday};

use crate::error::{CalError, CalResult};
use crate::event::CalendarEvent;
use crate::layout::{CellPosition, MonthGrid, YearMonth};
use crate::query::filter_events_for_day;

/// One day of the month with its grid cell and events.
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub position: CellPosition,
    pub events: Vec<&'a CalendarEvent>,
}

#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    month: YearMonth,
    grid: MonthGrid,
    days: Vec<DayCell<'a>>,
}

impl<'a> MonthView<'a> {
    pub fn build(
        month: YearMonth,
        week_start: Weekday,
        events: &'a [CalendarEvent],
    ) -> CalResult<Self> {
        let grid = month.grid(week_start)?;

        let days = grid
            .cells()
            .map(|(day, position)| {
                let date = month.date(day).ok_or_else(|| {
                    CalError::InvalidArgument(format!(
                        "{:04}-{:02}-{:02} is not a date",
                        month.year(),
                        month.month(),
                        day
                    ))
                })?;
                Ok(DayCell {
                    date,
                    position,
                    events: filter_events_for_day(events, date),
                })
            })
            .collect::<CalResult<Vec<_>>>()?;

        Ok(MonthView { month, grid, days })
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn headers(&self) -> [Weekday; 7] {
        self.grid.headers()
    }

    pub fn days(&self) -> &[DayCell<'a>] {
        &self.days
    }

    pub fn day(&self, day: u32) -> Option<&DayCell<'a>> {
        self.days.get(day.checked_sub(1)? as usize)
    }

    /// Content rows, each with seven cells; `None` is a blank cell.
    pub fn rows(&self) -> Vec<[Option<&DayCell<'a>>; 7]> {
        (0..self.grid.row_count())
            .map(|row| {
                let mut cells = [None; 7];
                for (column, cell) in cells.iter_mut().enumerate() {
                    *cell = self
                        .grid
                        .day_at(row, column as u32)
                        .and_then(|day| self.day(day));
                }
                cells
            })
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}
