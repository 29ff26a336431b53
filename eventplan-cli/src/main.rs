mod commands;
mod render;
mod routes;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventplan_core::manager::SearchFields;
use eventplan_core::{EventPlanConfig, HttpSessionClient};
use tracing_subscriber::EnvFilter;

use crate::commands::SessionFields;
use crate::routes::Route;

#[derive(Parser)]
#[command(name = "eventplan")]
#[command(about = "Browse, schedule and edit event sessions on an eventplan backend")]
struct Cli {
    /// Backend root URL (overrides config and EVENTPLAN_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month as a calendar grid
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Only sessions by this speaker
        #[arg(long)]
        speaker: Option<String>,

        /// Only sessions with this priority
        #[arg(short, long)]
        priority: Option<i32>,
    },
    /// List sessions one page at a time
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Rows per page (defaults to page_size from config)
        #[arg(long)]
        size: Option<u32>,

        #[arg(long)]
        speaker: Option<String>,

        #[arg(short, long)]
        priority: Option<i32>,

        /// Sessions from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Sessions until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create a session
    Create {
        #[command(flatten)]
        fields: SessionFields,
    },
    /// Replace the fields of an existing session
    Update {
        id: i64,

        #[command(flatten)]
        fields: SessionFields,
    },
    /// Delete a session
    Delete { id: i64 },
    /// Open the interactive page for a route ("/", "/calendar", "/sessions")
    Open {
        #[arg(default_value = "/")]
        route: String,
    },
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.api_base)?;
    let tz = config.timezone()?;
    let client = HttpSessionClient::from_config(&config)?;

    tracing::debug!(sessions = %config.sessions_url(), zone = %tz, "configured");

    match cli.command {
        Commands::Calendar {
            month,
            speaker,
            priority,
        } => commands::calendar::run(client, &config, tz, month, speaker, priority).await,
        Commands::List {
            page,
            size,
            speaker,
            priority,
            from,
            to,
        } => {
            let search = SearchFields {
                speaker: speaker.unwrap_or_default(),
                priority: priority.map(|p| p.to_string()).unwrap_or_default(),
                start_date: from.unwrap_or_default(),
                end_date: to.unwrap_or_default(),
            };
            let size = size.unwrap_or(config.page_size);
            commands::list::run(client, tz, page, size, search).await
        }
        Commands::Create { fields } => commands::save::create(&client, fields).await,
        Commands::Update { id, fields } => commands::save::update(&client, id, fields).await,
        Commands::Delete { id } => commands::delete::run(&client, id).await,
        Commands::Open { route } => {
            let route = Route::parse(&route)?;
            commands::open::run(client, &config, tz, route).await
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Logs go to stderr, filtered by EVENTPLAN_LOG (default "warn").
fn init_logging() {
    let filter = EnvFilter::try_from_env("EVENTPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(api_base: Option<String>) -> Result<EventPlanConfig> {
    let config = EventPlanConfig::load().context("Could not load configuration")?;

    match api_base {
        Some(base) => Ok(config.with_api_base(base)?),
        None => Ok(config),
    }
}
