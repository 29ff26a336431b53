//! Month calendar: grid arithmetic, day bucketing and the view state.

mod buckets;
mod grid;
mod view;

pub use buckets::{DayBuckets, DayCell, MAX_VISIBLE_PER_DAY};
pub use grid::{GRID_DAYS, MonthGrid, first_of_month, last_of_month, shift_month};
pub use view::{CalendarView, today_in};

/// Column headings, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
