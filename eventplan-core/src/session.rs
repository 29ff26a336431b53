//! Session records and the paginated envelope the backend returns them in.
//!
//! Timestamps are kept as the strings the backend sent so that a session
//! loaded, edited and sent back round-trips without reformatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A schedulable event session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server-assigned; `None` while the session is still a draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip: Option<bool>,
}

impl Session {
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_vip(&self) -> bool {
        self.vip.unwrap_or(false)
    }

    pub fn priority_color(&self) -> PriorityColor {
        PriorityColor::for_priority(self.priority)
    }

    /// Copy of this session without its id, as sent on create.
    pub fn without_id(&self) -> Session {
        Session {
            id: None,
            ..self.clone()
        }
    }

    /// Calendar date the session starts on, in zone `tz`.
    pub fn start_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        local_date(self.start_date_time.as_deref()?, tz)
    }

    /// Calendar date the session ends on, in zone `tz`.
    pub fn end_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        local_date(self.end_date_time.as_deref()?, tz)
    }

    /// Wall-clock start time in zone `tz`.
    pub fn start_local<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        local_date_time(self.start_date_time.as_deref()?, tz)
    }

    /// Wall-clock end time in zone `tz`.
    pub fn end_local<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        local_date_time(self.end_date_time.as_deref()?, tz)
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.title.is_empty() {
            write!(f, "(untitled)")
        } else {
            write!(f, "{}", self.title)
        }
    }
}

/// Parse an ISO-8601 timestamp into wall-clock time in zone `tz`.
///
/// Timestamps carrying an offset are converted into `tz`. Timestamps without
/// one are already wall-clock times and are taken as-is.
pub fn local_date_time<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn local_date<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    local_date_time(value, tz).map(|dt| dt.date())
}

/// Color bucket used when rendering a session by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityColor {
    Red,
    Amber,
    Yellow,
    Blue,
}

impl PriorityColor {
    pub fn for_priority(priority: Option<i32>) -> Self {
        match priority {
            Some(1) => PriorityColor::Red,
            Some(2) => PriorityColor::Amber,
            Some(3) => PriorityColor::Yellow,
            _ => PriorityColor::Blue,
        }
    }
}

/// Human label for a priority value.
pub fn priority_label(priority: Option<i32>) -> String {
    match priority {
        Some(1) => "1 (High)".to_string(),
        Some(2) => "2 (Medium)".to_string(),
        Some(3) => "3 (Low)".to_string(),
        Some(p) => p.to_string(),
        None => "-".to_string(),
    }
}

/// A server-paginated result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u32,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    /// Total page count for display; an empty result still shows "1 of 1".
    pub fn display_total_pages(&self) -> u32 {
        self.total_pages.max(1)
    }
}
