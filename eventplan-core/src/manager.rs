//! Session list and editor state.
//!
//! Holds one page of results, a single draft (create or edit), and the
//! search fields. Every mutation reloads the current page with the filters
//! that were last applied, and is announced on the change channel.

use chrono_tz::Tz;

use crate::client::SessionApi;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::EventPlanResult;
use crate::notify::{ChangeNotifier, SessionChange};
use crate::query::{FilterSet, SessionQuery, build_filter_set, parse_date_input};
use crate::session::{Page, Session};

/// Search bar inputs, kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFields {
    pub speaker: String,
    pub priority: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
}

impl SearchFields {
    pub fn to_filter_set(&self, tz: &Tz) -> EventPlanResult<FilterSet> {
        let start = parse_date_input(&self.start_date)?;
        let end = parse_date_input(&self.end_date)?;
        Ok(build_filter_set(&self.speaker, &self.priority, start, end, tz))
    }
}

pub struct SessionManager<A> {
    api: A,
    tz: Tz,
    notifier: Option<ChangeNotifier>,
    page_size: u32,
    page: Option<Page<Session>>,
    loading: bool,
    error: Option<String>,
    draft: Session,
    editing_id: Option<i64>,
    pub search: SearchFields,
    active_filters: FilterSet,
}

impl<A: SessionApi> SessionManager<A> {
    pub fn new(api: A, tz: Tz) -> Self {
        SessionManager {
            api,
            tz,
            notifier: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: None,
            loading: false,
            error: None,
            draft: Session::default(),
            editing_id: None,
            search: SearchFields::default(),
            active_filters: FilterSet::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Announce successful mutations on `notifier`.
    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Load one page. On failure the previously shown page stays and the
    /// error is recorded.
    pub async fn load(&mut self, page: u32, size: u32, filters: FilterSet) {
        self.loading = true;
        self.error = None;

        let query = SessionQuery::new(page, size, filters.clone());
        self.active_filters = filters;

        match self.api.list_sessions(&query).await {
            Ok(result) => self.page = Some(result),
            Err(e) => {
                tracing::error!(error = %e, page, size, "session list load failed");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    /// Reload the page currently shown, with the active filters.
    pub async fn reload(&mut self) {
        let (number, size) = self.current_position();
        self.load(number, size, self.active_filters.clone()).await;
    }

    /// Create the draft, or update the session being edited. On success the
    /// draft is cleared and the current page reloaded; on failure the draft
    /// is kept as it was. Returns whether the save succeeded.
    pub async fn submit(&mut self) -> bool {
        self.loading = true;
        self.error = None;

        let result = match self.editing_id {
            Some(id) => self
                .api
                .update_session(id, &self.draft)
                .await
                .map(SessionChange::Updated),
            None => self
                .api
                .create_session(&self.draft.without_id())
                .await
                .map(SessionChange::Created),
        };

        let saved = match result {
            Ok(change) => {
                self.draft = Session::default();
                self.editing_id = None;
                self.publish(change);
                self.reload().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, editing = ?self.editing_id, "save failed");
                self.error = Some(e.to_string());
                false
            }
        };

        self.loading = false;
        saved
    }

    /// Delete a session and reload. A session without an id was never
    /// saved, so this does nothing and issues no request.
    pub async fn remove(&mut self, id: Option<i64>) -> bool {
        let Some(id) = id else {
            return false;
        };

        self.loading = true;
        self.error = None;

        let deleted = match self.api.delete_session(id).await {
            Ok(()) => {
                if self.editing_id == Some(id) {
                    self.cancel_edit();
                }
                self.publish(SessionChange::Deleted(id));
                self.reload().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, id, "delete failed");
                self.error = Some(e.to_string());
                false
            }
        };

        self.loading = false;
        deleted
    }

    /// Copy `session` into the draft and switch to edit mode for its id.
    pub fn start_edit(&mut self, session: &Session) {
        self.editing_id = session.id;
        self.draft = session.clone();
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.draft = Session::default();
    }

    /// Apply the search fields and go back to the first page.
    pub async fn apply_search(&mut self) {
        match self.search.to_filter_set(&self.tz) {
            Ok(filters) => {
                let size = self.current_position().1;
                self.load(0, size, filters).await;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub async fn clear_search(&mut self) {
        self.search = SearchFields::default();
        let size = self.current_position().1;
        self.load(0, size, FilterSet::default()).await;
    }

    pub async fn next_page(&mut self) {
        if !self.has_next() {
            return;
        }
        let (number, size) = self.current_position();
        self.load(number + 1, size, self.active_filters.clone()).await;
    }

    pub async fn previous_page(&mut self) {
        if !self.has_previous() {
            return;
        }
        let (number, size) = self.current_position();
        self.load(number - 1, size, self.active_filters.clone()).await;
    }

    pub fn has_previous(&self) -> bool {
        self.page.as_ref().is_some_and(Page::has_previous)
    }

    pub fn has_next(&self) -> bool {
        self.page.as_ref().is_some_and(Page::has_next)
    }

    fn current_position(&self) -> (u32, u32) {
        match &self.page {
            Some(page) if page.size > 0 => (page.number, page.size),
            Some(page) => (page.number, self.page_size),
            None => (0, self.page_size),
        }
    }

    fn publish(&self, change: SessionChange) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(change);
        }
    }

    pub fn page(&self) -> Option<&Page<Session>> {
        self.page.as_ref()
    }

    pub fn sessions(&self) -> &[Session] {
        self.page.as_ref().map(|p| p.content.as_slice()).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &Session {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Session {
        &mut self.draft
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn active_filters(&self) -> &FilterSet {
        &self.active_filters
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}
