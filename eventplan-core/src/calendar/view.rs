//! State behind the month calendar: visible range, filters and the
//! sessions loaded for them.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use super::buckets::{DayBuckets, DayCell};
use super::grid::{MonthGrid, first_of_month, last_of_month, shift_month};
use crate::client::SessionApi;
use crate::notify::ChangeSubscription;
use crate::query::{SessionQuery, build_filter_set};
use crate::session::Session;

/// Today's date in zone `tz`.
pub fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

pub struct CalendarView<A> {
    api: A,
    tz: Tz,
    fetch_size: u32,
    sessions: Vec<Session>,
    buckets: DayBuckets,
    loading: bool,
    error: Option<String>,
    /// Raw filter inputs, as typed.
    pub speaker: String,
    pub priority: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    changes: Option<ChangeSubscription>,
}

impl<A: SessionApi> CalendarView<A> {
    /// A calendar showing the month containing `today`. Nothing is loaded
    /// until [`CalendarView::load`] is called.
    pub fn new(api: A, tz: Tz, fetch_size: u32, today: NaiveDate) -> Self {
        CalendarView {
            api,
            tz,
            fetch_size,
            sessions: Vec::new(),
            buckets: DayBuckets::default(),
            loading: false,
            error: None,
            speaker: String::new(),
            priority: String::new(),
            start_date: first_of_month(today),
            end_date: last_of_month(today),
            changes: None,
        }
    }

    /// Reload whenever a drained subscription yields changes.
    pub fn with_subscription(mut self, changes: ChangeSubscription) -> Self {
        self.changes = Some(changes);
        self
    }

    /// Load sessions for the current range and filters.
    pub async fn load(&mut self) {
        self.load_range(self.start_date, self.end_date).await;
    }

    /// Load sessions for an explicit range. Callers that just changed the
    /// range pass it here instead of relying on state they may not have
    /// written yet.
    pub async fn load_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.loading = true;
        self.error = None;

        let filters = build_filter_set(&self.speaker, &self.priority, Some(start), Some(end), &self.tz);
        let query = SessionQuery::new(0, self.fetch_size, filters);

        match self.api.list_sessions(&query).await {
            Ok(page) => self.set_sessions(page.content),
            Err(e) => {
                tracing::error!(error = %e, "calendar load failed");
                self.error = Some(e.to_string());
                self.set_sessions(Vec::new());
            }
        }

        self.loading = false;
    }

    /// Move the visible month by `delta` and reload for the new month.
    pub async fn change_month(&mut self, delta: i32) {
        let new_start = shift_month(self.start_date, delta);
        let new_end = last_of_month(new_start);
        self.start_date = new_start;
        self.end_date = new_end;
        self.load_range(new_start, new_end).await;
    }

    /// Set the filters and date range, then reload. The visible month
    /// follows `from`.
    pub async fn apply_filters(
        &mut self,
        speaker: impl Into<String>,
        priority: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) {
        self.speaker = speaker.into();
        self.priority = priority.into();
        self.start_date = from;
        self.end_date = to;
        self.load_range(from, to).await;
    }

    /// Reset filters and go back to the current month.
    pub async fn clear_filters(&mut self) {
        self.speaker.clear();
        self.priority.clear();
        let today = today_in(&self.tz);
        let (start, end) = (first_of_month(today), last_of_month(today));
        self.start_date = start;
        self.end_date = end;
        self.load_range(start, end).await;
    }

    /// Drain pending change notifications and reload if there were any.
    /// Returns whether a reload happened.
    pub async fn sync_changes(&mut self) -> bool {
        let changed = self
            .changes
            .as_mut()
            .map(|sub| !sub.drain().is_empty())
            .unwrap_or(false);

        if changed {
            tracing::debug!("sessions changed elsewhere, reloading calendar");
            self.load().await;
        }
        changed
    }

    fn set_sessions(&mut self, sessions: Vec<Session>) {
        let grid = self.grid();
        self.buckets =
            DayBuckets::from_sessions(&sessions, &self.tz, grid.first_day()..=grid.last_day());
        self.sessions = sessions;
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::for_anchor(self.start_date)
    }

    pub fn cell(&self, day: NaiveDate, grid: &MonthGrid) -> DayCell<'_> {
        self.buckets.cell(day, grid.in_month(day))
    }

    pub fn buckets(&self) -> &DayBuckets {
        &self.buckets
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Heading for the visible month, e.g. "October 2025".
    pub fn title(&self) -> String {
        self.start_date.format("%B %Y").to_string()
    }
}
