//! eventplan configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file at
//! `~/.config/eventplan/config.toml`, then `EVENTPLAN_*` environment
//! variables. The CLI applies its own flags on top.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{EventPlanError, EventPlanResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_CALENDAR_FETCH_SIZE: u32 = 1000;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_calendar_fetch_size() -> u32 {
    DEFAULT_CALENDAR_FETCH_SIZE
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventPlanConfig {
    /// Backend root; sessions live under `{api_base}/events/sessions`.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// IANA zone used to turn dates into day boundaries. Defaults to the
    /// system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// How many sessions the calendar requests for one visible range.
    #[serde(default = "default_calendar_fetch_size")]
    pub calendar_fetch_size: u32,
}

impl Default for EventPlanConfig {
    fn default() -> Self {
        EventPlanConfig {
            api_base: default_api_base(),
            timezone: None,
            page_size: default_page_size(),
            calendar_fetch_size: default_calendar_fetch_size(),
        }
    }
}

impl EventPlanConfig {
    pub fn config_path() -> EventPlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventPlanError::Config("Could not determine config directory".into()))?
            .join("eventplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the layered configuration, writing a commented default file on
    /// first run.
    pub fn load() -> EventPlanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Err(e) = Self::create_default_config(&config_path) {
                tracing::warn!(path = %config_path.display(), error = %e, "could not create default config");
            }
        }

        let config = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("EVENTPLAN").try_parsing(true))
            .build()
            .map_err(|e| EventPlanError::Config(e.to_string()))?;

        Self::finish(config)
    }

    /// Parse configuration from TOML text only, without file or environment.
    pub fn from_toml_str(contents: &str) -> EventPlanResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .map_err(|e| EventPlanError::Config(e.to_string()))?;

        Self::finish(config)
    }

    fn finish(config: Config) -> EventPlanResult<Self> {
        let parsed: EventPlanConfig = config
            .try_deserialize()
            .map_err(|e| EventPlanError::Config(e.to_string()))?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> EventPlanResult<Self> {
        self.api_base = api_base.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> EventPlanResult<()> {
        let url = url::Url::parse(&self.api_base)
            .map_err(|e| EventPlanError::Config(format!("Invalid api_base '{}': {e}", self.api_base)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EventPlanError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.page_size == 0 || self.calendar_fetch_size == 0 {
            return Err(EventPlanError::Config("Page sizes must be at least 1".into()));
        }
        if let Some(name) = &self.timezone {
            parse_timezone(name)?;
        }
        Ok(())
    }

    /// Full URL of the sessions collection.
    pub fn sessions_url(&self) -> String {
        format!("{}/events/sessions", self.api_base.trim_end_matches('/'))
    }

    /// Zone used for all date arithmetic: the configured one, else the
    /// system zone, else UTC.
    pub fn timezone(&self) -> EventPlanResult<Tz> {
        match &self.timezone {
            Some(name) => parse_timezone(name),
            None => Ok(system_timezone()),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventPlanResult<()> {
        let contents = default_config_contents();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventPlanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventPlanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Contents of a fresh config file: every option, commented out at its
/// default.
fn default_config_contents() -> String {
    format!(
        "\
# eventplan configuration

# Backend root URL (sessions live under <api_base>/events/sessions):
# api_base = \"{DEFAULT_API_BASE}\"

# Time zone for calendar days and date filters (defaults to the system zone):
# timezone = \"Europe/Berlin\"

# Rows per page in the session list:
# page_size = {DEFAULT_PAGE_SIZE}

# Sessions fetched for one calendar month:
# calendar_fetch_size = {DEFAULT_CALENDAR_FETCH_SIZE}
"
    )
}

fn parse_timezone(name: &str) -> EventPlanResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| EventPlanError::Config(format!("Unknown time zone '{name}'")))
}

fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(zone = %name, "system time zone not recognised, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            tracing::warn!(error = %e, "could not detect system time zone, using UTC");
            Tz::UTC
        }
    }
}
