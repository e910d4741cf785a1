//! Month grid calculation: a fixed 6 x 7 block of days starting on Monday.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// A displayable month. Only months whose whole grid fits in the
/// representable date range can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewedMonth {
    first: NaiveDate,
}

impl ViewedMonth {
    /// `month0` is zero-based and may lie outside `0..12`; the year absorbs
    /// the overflow, so `(2024, -1)` is December 2023.
    pub fn new(year: i32, month0: i32) -> Option<Self> {
        let total = i64::from(year) * 12 + i64::from(month0);
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;

        // leading days of the previous month and the trailing tail
        first.checked_sub_days(Days::new(6))?;
        first.checked_add_days(Days::new(GRID_CELLS as u64))?;

        Some(Self { first })
    }

    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// 1-12.
    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn month0(self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Monday-based offset of the 1st: Monday is 0, Sunday is 6.
    pub fn start_offset(self) -> u32 {
        (self.first.weekday().num_days_from_sunday() + 6) % 7
    }
}

impl fmt::Display for ViewedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub day_number: u32,
    pub outside: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: ViewedMonth,
    pub start_offset: u32,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn compute(month: ViewedMonth) -> Self {
        let start_offset = month.start_offset();
        let days_in_month = month.days();
        let days_in_prev_month = previous_month_days(month);

        // `ViewedMonth::new` guarantees the whole span is representable.
        let grid_start = month.first_day() - Days::new(u64::from(start_offset));

        let cells = grid_start
            .iter_days()
            .take(GRID_CELLS)
            .enumerate()
            .map(|(i, date)| {
                let i = i as u32;
                let (day_number, outside) = if i < start_offset {
                    (days_in_prev_month - start_offset + i + 1, true)
                } else if i >= start_offset + days_in_month {
                    (i - start_offset - days_in_month + 1, true)
                } else {
                    (i - start_offset + 1, false)
                };
                GridCell {
                    date,
                    day_number,
                    outside,
                }
            })
            .collect();

        Self {
            month,
            start_offset,
            cells,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells.iter().position(|cell| cell.date == date)
    }
}

/// Grid for a possibly non-normalized `(year, month0)` pair. `None` only when
/// the month lies outside the representable date range.
pub fn compute_grid(year: i32, month0: i32) -> Option<MonthGrid> {
    ViewedMonth::new(year, month0).map(MonthGrid::compute)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn previous_month_days(month: ViewedMonth) -> u32 {
    if month.month() == 1 {
        days_in_month(month.year() - 1, 12)
    } else {
        days_in_month(month.year(), month.month() - 1)
    }
}

/// Moves `date` by `delta` months keeping its day-of-month; days past the end
/// of the target month roll forward into the following one, so 31 March minus
/// one month lands on 3 March (2 March in leap years).
pub fn shift_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(delta);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day0())))
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
