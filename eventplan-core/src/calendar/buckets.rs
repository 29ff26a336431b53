//! Day bucketing: which sessions show up on which calendar day.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{NaiveDate, TimeZone};

use crate::session::Session;

/// Entries shown in one day cell before collapsing into "+N more".
pub const MAX_VISIBLE_PER_DAY: usize = 4;

/// Sessions keyed by every calendar day they span.
#[derive(Debug, Clone, Default)]
pub struct DayBuckets {
    days: BTreeMap<NaiveDate, Vec<Session>>,
}

impl DayBuckets {
    /// Bucket sessions by the days they cover in zone `tz`, inclusive of
    /// both ends. Only days inside `window` get a bucket, so open-ended
    /// sessions cost at most one entry per shown day. Sessions without a
    /// parseable start and end are skipped. Within a day, sessions keep the
    /// order they were given in.
    pub fn from_sessions<Tz: TimeZone>(
        sessions: &[Session],
        tz: &Tz,
        window: RangeInclusive<NaiveDate>,
    ) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<Session>> = BTreeMap::new();

        for session in sessions {
            let (Some(start), Some(end)) = (session.start_date(tz), session.end_date(tz)) else {
                continue;
            };

            let mut day = start.max(*window.start());
            let last = end.min(*window.end());
            while day <= last {
                days.entry(day).or_default().push(session.clone());
                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }
        }

        DayBuckets { days }
    }

    pub fn sessions_on(&self, day: NaiveDate) -> &[Session] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, day: NaiveDate, in_month: bool) -> DayCell<'_> {
        DayCell {
            date: day,
            in_month,
            sessions: self.sessions_on(day),
        }
    }

    /// Days that have at least one session, in date order.
    pub fn days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// One rendered day of the grid.
#[derive(Debug, Clone, Copy)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub sessions: &'a [Session],
}

impl<'a> DayCell<'a> {
    pub fn visible(&self) -> &'a [Session] {
        &self.sessions[..self.sessions.len().min(MAX_VISIBLE_PER_DAY)]
    }

    /// Sessions hidden behind the "+N more" marker.
    pub fn overflow(&self) -> usize {
        self.sessions.len().saturating_sub(MAX_VISIBLE_PER_DAY)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
