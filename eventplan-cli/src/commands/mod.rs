pub mod calendar;
pub mod config;
pub mod delete;
pub mod list;
pub mod open;
pub mod save;

use clap::Args;
use eventplan_core::Session;

/// Editable session fields, shared by `create` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionFields {
    /// Session title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Speaker name
    #[arg(long)]
    pub speaker: Option<String>,

    /// Start date/time (e.g., "2025-10-21T09:00:00")
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date/time (e.g., "2025-10-21T10:00:00")
    #[arg(short, long)]
    pub end: Option<String>,

    /// Priority: 1 (high), 2 (medium), 3 (low)
    #[arg(short, long)]
    pub priority: Option<i32>,

    /// Mark the session as VIP
    #[arg(long)]
    pub vip: bool,
}

impl SessionFields {
    pub fn into_session(self, id: Option<i64>) -> Session {
        Session {
            id,
            title: self.title,
            speaker: self.speaker.filter(|s| !s.is_empty()),
            priority: self.priority,
            start_date_time: self.start.filter(|s| !s.is_empty()),
            end_date_time: self.end.filter(|s| !s.is_empty()),
            vip: Some(self.vip),
        }
    }
}
