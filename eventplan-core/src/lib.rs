//! Core types for eventplan.
//!
//! - `session`: the Session record and the paginated `Page` envelope
//! - `query`: filter and query-string construction for the list endpoint
//! - `client`: the REST client for the sessions backend
//! - `calendar`: month grid, day bucketing and the calendar view state
//! - `manager`: list/editor view state
//! - `notify`: change notifications between views

pub mod calendar;
pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod notify;
pub mod query;
pub mod session;

pub use client::{HttpSessionClient, SessionApi};
pub use config::EventPlanConfig;
pub use error::{EventPlanError, EventPlanResult};
pub use session::{Page, PriorityColor, Session};
