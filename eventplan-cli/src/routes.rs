//! Maps URL-like paths to pages, and composes the sessions page.

use anyhow::Result;
use chrono_tz::Tz;
use eventplan_core::calendar::{CalendarView, today_in};
use eventplan_core::manager::SessionManager;
use eventplan_core::notify::ChangeNotifier;
use eventplan_core::{EventPlanConfig, SessionApi};
use owo_colors::OwoColorize;

use crate::render;

pub const KNOWN_ROUTES: [&str; 3] = ["/", "/calendar", "/sessions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Calendar and session list together (`/` and `/calendar`).
    Sessions,
    /// Session list on its own (`/sessions`).
    SessionList,
}

impl Route {
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        match path {
            "" | "/calendar" | "calendar" => Ok(Route::Sessions),
            "/sessions" | "sessions" => Ok(Route::SessionList),
            other => anyhow::bail!(
                "Unknown route '{}'. Available: {}",
                other,
                KNOWN_ROUTES.join(", ")
            ),
        }
    }

    pub fn shows_calendar(self) -> bool {
        matches!(self, Route::Sessions)
    }
}

/// One page session: the views a route shows, wired to the same change
/// channel. The manager publishes; the calendar subscribes.
pub struct SessionsPage<A> {
    pub route: Route,
    pub calendar: Option<CalendarView<A>>,
    pub manager: SessionManager<A>,
}

impl<A: SessionApi + Clone> SessionsPage<A> {
    pub fn compose(route: Route, api: A, config: &EventPlanConfig, tz: Tz) -> Self {
        let notifier = ChangeNotifier::new();

        let calendar = route.shows_calendar().then(|| {
            CalendarView::new(api.clone(), tz, config.calendar_fetch_size, today_in(&tz))
                .with_subscription(notifier.subscribe())
        });

        let manager = SessionManager::new(api, tz)
            .with_page_size(config.page_size)
            .with_notifier(notifier);

        SessionsPage {
            route,
            calendar,
            manager,
        }
    }

    /// Initial load of every view on the page.
    pub async fn load(&mut self) {
        if let Some(calendar) = self.calendar.as_mut() {
            calendar.load().await;
        }
        let size = self.manager.page_size();
        let filters = self.manager.active_filters().clone();
        self.manager.load(0, size, filters).await;
    }

    /// Let subscribed views catch up with mutations made since the last
    /// call.
    pub async fn sync(&mut self) {
        if let Some(calendar) = self.calendar.as_mut() {
            calendar.sync_changes().await;
        }
    }

    pub fn render(&self) -> String {
        let mut blocks = vec![format!("{}", "Event Planning System".bold().underline())];
        if let Some(calendar) = &self.calendar {
            blocks.push(render::render_calendar(calendar));
        }
        blocks.push(render::render_manager(&self.manager));
        blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventplan_core::HttpSessionClient;

    #[test]
    fn root_and_calendar_share_a_page() {
        assert_eq!(Route::parse("/").unwrap(), Route::Sessions);
        assert_eq!(Route::parse("/calendar").unwrap(), Route::Sessions);
        assert_eq!(Route::parse("/calendar/").unwrap(), Route::Sessions);
        assert_eq!(Route::parse("/sessions?page=2").unwrap(), Route::SessionList);
    }

    #[test]
    fn unknown_route_lists_known_ones() {
        let err = Route::parse("/admin").unwrap_err().to_string();
        assert!(err.contains("/sessions"));
    }

    #[test]
    fn list_route_has_no_calendar() {
        let config = EventPlanConfig::default();
        let client = HttpSessionClient::from_config(&config).unwrap();

        let page = SessionsPage::compose(Route::SessionList, client.clone(), &config, Tz::UTC);
        assert!(page.calendar.is_none());

        let page = SessionsPage::compose(Route::Sessions, client, &config, Tz::UTC);
        assert!(page.calendar.is_some());
        assert_eq!(page.manager.page_size(), config.page_size);
    }
}
