//! Month grid arithmetic.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Cells in a month grid: six Sunday-first weeks.
pub const GRID_DAYS: usize = 42;

/// A fixed 6x7 grid covering the month of an anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    days: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Grid for the month containing `anchor`. The first cell is the Sunday
    /// on or before the 1st. At the edges of the representable calendar the
    /// grid is cut short instead of running past them.
    pub fn for_anchor(anchor: NaiveDate) -> Self {
        let month_start = first_of_month(anchor);
        let month_end = last_of_month(anchor);

        let lead = month_start.weekday().num_days_from_sunday() as u64;
        let first = month_start
            .checked_sub_days(Days::new(lead))
            .unwrap_or(month_start);

        let days = first.iter_days().take(GRID_DAYS).collect();

        MonthGrid {
            month_start,
            month_end,
            days,
        }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days.last().copied().unwrap_or(self.month_end)
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }

    pub fn in_month(&self, day: NaiveDate) -> bool {
        day >= self.month_start && day <= self.month_end
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// First day of the month `delta` months away from `date`'s month.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + delta;
    let year = index.div_euclid(12);
    let month0 = index.rem_euclid(12) as u32;
    // Day 1 exists in every month of every representable year.
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(date)
}
