use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use eventplan_core::calendar::{CalendarView, first_of_month, last_of_month, today_in};
use eventplan_core::{EventPlanConfig, HttpSessionClient};
use owo_colors::OwoColorize;

use crate::render::{self, Render};
use crate::utils::tui::with_spinner;

pub async fn run(
    client: HttpSessionClient,
    config: &EventPlanConfig,
    tz: Tz,
    month: Option<String>,
    speaker: Option<String>,
    priority: Option<i32>,
) -> Result<()> {
    let anchor = match month {
        Some(m) => parse_month(&m)?,
        None => today_in(&tz),
    };

    let mut view = CalendarView::new(client, tz, config.calendar_fetch_size, anchor);
    let (from, to) = (first_of_month(anchor), last_of_month(anchor));
    let speaker = speaker.unwrap_or_default();
    let priority = priority.map(|p| p.to_string()).unwrap_or_default();

    with_spinner("Loading calendar...", view.apply_filters(speaker, priority, from, to)).await;

    println!("{}", render::render_calendar(&view));

    if let Some(error) = view.error() {
        anyhow::bail!("{}", error);
    }

    print_agenda(&view, from, to);
    Ok(())
}

/// Every session of the month, grouped by day, including the ones the grid
/// collapsed into "+N more".
fn print_agenda<A: eventplan_core::SessionApi>(
    view: &CalendarView<A>,
    from: NaiveDate,
    to: NaiveDate,
) {
    let buckets = view.buckets();
    let days: Vec<_> = buckets.days().filter(|d| **d >= from && **d <= to).collect();

    if days.is_empty() {
        println!("\n{}", "No events".dimmed());
        return;
    }

    for day in days {
        println!("\n{}", render::format_date_label(*day).bold());
        for session in buckets.sessions_on(*day) {
            let span = render::format_time_span(session, view.timezone());
            println!("  {} {}", format!("{span:<11}").dimmed(), session.render());
        }
    }
}

/// Parse `YYYY-MM` into the first day of that month. Years outside
/// 1..=9999 are rejected.
fn parse_month(input: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", input))?;

    if !(1..=9999).contains(&date.year()) {
        anyhow::bail!("Invalid month '{}'. Year must be between 0001 and 9999", input);
    }
    Ok(date)
}
