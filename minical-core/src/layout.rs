//! Month-grid layout.
//!
//! Maps every day of a month to a `(row, column)` cell of a seven-column grid
//! whose first column is a configurable week-start day. All date arithmetic is
//! proleptic Gregorian and does not consult any locale tables.
//!
//! Rows are 0-indexed content rows. Hosts that draw a weekday header above the
//! grid add [`MonthGrid::HEADER_ROWS`] to the row when placing a cell.

use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;

use crate::error::{CalError, CalResult};

/// Day-of-week lookup with Sunday at index 0.
const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Days between 0000-03-01 and 1970-01-01 in the shifted-year scheme.
const UNIX_EPOCH_SHIFT: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> CalResult<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return Err(invalid_month(month)),
    };
    Ok(days)
}

/// Days since 1970-01-01 for a proleptic Gregorian date. Negative before the epoch.
///
/// The caller is responsible for passing a real date; out-of-range days are
/// not rejected and simply roll into the neighbouring month.
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let day = i64::from(day);
    let year = i64::from(year) - i64::from(month <= 2);

    let era = if year >= 0 { year } else { year - 399 } / 400;
    let year_of_era = year - era * 400;
    // March = 0 so that the leap day is the last day of the shifted year
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * DAYS_PER_ERA + day_of_era - UNIX_EPOCH_SHIFT
}

/// Weekday of a proleptic Gregorian date.
pub fn weekday_of(year: i32, month: u32, day: u32) -> Weekday {
    // 1970-01-01 was a Thursday
    let index = (days_from_civil(year, month, day) + 4).rem_euclid(7);
    SUNDAY_FIRST[index as usize]
}

/// Parse a week-start day such as `"monday"`, `"Mon"` or `"sun"`.
pub fn parse_week_start(value: &str) -> CalResult<Weekday> {
    value.trim().parse::<Weekday>().map_err(|_| {
        CalError::InvalidArgument(format!(
            "Unrecognized week start '{}'. Expected a day name such as 'sunday' or 'mon'",
            value
        ))
    })
}

/// Column labels for a grid starting on `week_start`.
pub fn weekday_headers(week_start: Weekday) -> [Weekday; 7] {
    let mut headers = [week_start; 7];
    for column in 1..7 {
        headers[column] = headers[column - 1].succ();
    }
    headers
}

/// A `(row, column)` cell in the content area of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: u32,
    pub column: u32,
}

/// Position table for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    week_start: Weekday,
    offset: u32,
    row_count: u32,
    /// Indexed by `day - 1`
    positions: Vec<CellPosition>,
}

impl MonthGrid {
    /// Rows a host reserves above the content rows for weekday labels.
    pub const HEADER_ROWS: u32 = 1;

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Leading blank cells before day 1, in `[0, 6]`.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn days_in_month(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn position(&self, day: u32) -> Option<CellPosition> {
        let index = day.checked_sub(1)?;
        self.positions.get(index as usize).copied()
    }

    /// Inverse lookup: the day shown in a cell, if any.
    pub fn day_at(&self, row: u32, column: u32) -> Option<u32> {
        if column >= 7 {
            return None;
        }
        let cell = (row * 7 + column).checked_sub(self.offset)?;
        let day = cell + 1;
        (day <= self.days_in_month()).then_some(day)
    }

    /// `(day, position)` pairs in day order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, CellPosition)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(index, position)| (index as u32 + 1, *position))
    }

    pub fn headers(&self) -> [Weekday; 7] {
        weekday_headers(self.week_start)
    }
}

/// Lay out `month` of `year` on a grid whose first column is `week_start`.
pub fn compute_month_grid(year: i32, month: u32, week_start: Weekday) -> CalResult<MonthGrid> {
    if year < 0 {
        return Err(CalError::InvalidArgument(format!(
            "Year must not be negative, got {}",
            year
        )));
    }
    let days = days_in_month(year, month)?;

    let first = weekday_of(year, month, 1).num_days_from_sunday();
    let offset = (first + 7 - week_start.num_days_from_sunday()) % 7;

    let total_cells = days + offset;
    let row_count = total_cells.div_ceil(7);

    let positions = (1..=days)
        .map(|day| {
            let cell = offset + day - 1;
            CellPosition {
                row: cell / 7,
                column: cell % 7,
            }
        })
        .collect();

    debug!(
        "Laid out {:04}-{:02}: offset {}, {} days, {} rows (week starts {})",
        year, month, offset, days, row_count, week_start
    );

    Ok(MonthGrid {
        year,
        month,
        week_start,
        offset,
        row_count,
        positions,
    })
}

/// A calendar month, used for navigating between grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> CalResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(invalid_month(month));
        }
        Ok(YearMonth { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            YearMonth { year: self.year + 1, month: 1 }
        } else {
            YearMonth { month: self.month + 1, ..self }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            YearMonth { year: self.year - 1, month: 12 }
        } else {
            YearMonth { month: self.month - 1, ..self }
        }
    }

    /// The date of `day` in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn grid(&self, week_start: Weekday) -> CalResult<MonthGrid> {
        compute_month_grid(self.year, self.month, week_start)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn invalid_month(month: u32) -> CalError {
    CalError::InvalidArgument(format!("Month must be in 1..=12, got {}", month))
}
