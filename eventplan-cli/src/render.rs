//! TUI rendering for eventplan types.
//!
//! Extension traits and helpers that turn core types into colored terminal
//! output using owo_colors.

use chrono::NaiveDate;
use chrono_tz::Tz;
use eventplan_core::calendar::{CalendarView, DayCell, MonthGrid, WEEKDAY_LABELS};
use eventplan_core::manager::SessionManager;
use eventplan_core::session::priority_label;
use eventplan_core::{Page, PriorityColor, Session, SessionApi};
use owo_colors::OwoColorize;

/// Width of one calendar column, excluding the separator.
const CELL_WIDTH: usize = 16;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Session {
    fn render(&self) -> String {
        let title = colorize_priority(self.priority_color(), &self.to_string());
        let vip = if self.is_vip() { format!(" {}", "VIP".bold()) } else { String::new() };
        match &self.speaker {
            Some(speaker) if !speaker.is_empty() => {
                format!("{}{} {}", title, vip, format!("({speaker})").dimmed())
            }
            _ => format!("{}{}", title, vip),
        }
    }
}

impl Render for PriorityColor {
    fn render(&self) -> String {
        colorize_priority(*self, "■")
    }
}

/// Colorize text according to the priority bucket
pub fn colorize_priority(color: PriorityColor, text: &str) -> String {
    match color {
        PriorityColor::Red => text.red().to_string(),
        PriorityColor::Amber => text.truecolor(255, 176, 64).to_string(),
        PriorityColor::Yellow => text.bright_yellow().to_string(),
        PriorityColor::Blue => text.blue().to_string(),
    }
}

/// Wall-clock span of a session in `tz`, e.g. "08:00-10:00". Empty when
/// either end is missing.
pub fn format_time_span(session: &Session, tz: &Tz) -> String {
    match (session.start_local(tz), session.end_local(tz)) {
        (Some(start), Some(end)) => {
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        _ => String::new(),
    }
}

/// Cut `text` to `width` characters, marking the cut with "…".
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{:<width$}", text, width = width)
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn blank() -> String {
    " ".repeat(CELL_WIDTH)
}

/// Lines for one day cell: day number, up to four chips, then either the
/// overflow marker or the empty placeholder.
fn render_cell(cell: &DayCell<'_>, tz: &Tz) -> Vec<String> {
    let mut lines = Vec::new();

    let day = format!("{:>width$}", cell.date.format("%-d").to_string(), width = CELL_WIDTH);
    lines.push(if cell.in_month {
        day.bold().to_string()
    } else {
        day.dimmed().to_string()
    });

    for session in cell.visible() {
        let time = session
            .start_local(tz)
            .filter(|start| start.date() == cell.date)
            .map(|start| start.format("%H:%M ").to_string())
            .unwrap_or_default();
        let chip = fit(&format!("{time}{session}"), CELL_WIDTH);
        lines.push(colorize_priority(session.priority_color(), &chip));
    }

    if cell.overflow() > 0 {
        let more = fit(&format!("+{} more", cell.overflow()), CELL_WIDTH);
        lines.push(more.dimmed().to_string());
    } else if cell.is_empty() {
        lines.push(fit("·", CELL_WIDTH).dimmed().to_string());
    }

    lines
}

/// Render the calendar as a six-week grid.
pub fn render_calendar<A: SessionApi>(view: &CalendarView<A>) -> String {
    let grid: MonthGrid = view.grid();
    let mut out = Vec::new();

    out.push(format!("{}", view.title().bold()));
    out.push(format!(
        "{} high  {} medium  {} low  {} other",
        PriorityColor::Red.render(),
        PriorityColor::Amber.render(),
        PriorityColor::Yellow.render(),
        PriorityColor::Blue.render(),
    ));
    if let Some(error) = view.error() {
        out.push(format!("{}", error.red()));
    }

    let header: Vec<String> = WEEKDAY_LABELS
        .iter()
        .map(|w| format!("{:^width$}", w, width = CELL_WIDTH))
        .collect();
    out.push(header.join("│").dimmed().to_string());

    let rule = vec!["─".repeat(CELL_WIDTH); 7].join("┼");
    let separator = "│".dimmed().to_string();

    for week in grid.weeks() {
        out.push(rule.dimmed().to_string());

        let columns: Vec<Vec<String>> = week
            .iter()
            .map(|day| render_cell(&view.cell(*day, &grid), view.timezone()))
            .collect();
        let height = columns.iter().map(Vec::len).max().unwrap_or(0);

        for row in 0..height {
            let line: Vec<String> = columns
                .iter()
                .map(|col| col.get(row).cloned().unwrap_or_else(blank))
                .collect();
            out.push(line.join(separator.as_str()));
        }
    }

    out.join("\n")
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// Render a page of sessions as a numbered table with a pager line.
pub fn render_table(page: Option<&Page<Session>>) -> String {
    let mut lines = Vec::new();

    lines.push(
        format!(
            "{:>3}  {:<28} {:<18} {:<20} {:<20} {:<11} {}",
            "#", "Title", "Speaker", "Start", "End", "Priority", "VIP"
        )
        .dimmed()
        .to_string(),
    );

    let sessions = page.map(|p| p.content.as_slice()).unwrap_or(&[]);
    if sessions.is_empty() {
        lines.push(format!("     {}", "No sessions".dimmed()));
    }

    for (i, s) in sessions.iter().enumerate() {
        let title = colorize_priority(s.priority_color(), &fit(&s.to_string(), 28));
        lines.push(format!(
            "{:>3}  {} {:<18} {:<20} {:<20} {:<11} {}",
            i + 1,
            title,
            fit(or_dash(s.speaker.as_deref()), 18),
            fit(or_dash(s.start_date_time.as_deref()), 20),
            fit(or_dash(s.end_date_time.as_deref()), 20),
            priority_label(s.priority),
            if s.is_vip() { "Yes" } else { "No" },
        ));
    }

    let (number, total) = page
        .map(|p| (p.number + 1, p.display_total_pages()))
        .unwrap_or((1, 1));
    let prev = if page.is_some_and(Page::has_previous) { "‹ prev" } else { "      " };
    let next = if page.is_some_and(Page::has_next) { "next ›" } else { "" };
    lines.push(format!("{}  Page {} of {}  {}", prev.dimmed(), number, total, next.dimmed()));

    lines.join("\n")
}

/// The list/editor block: status, error banner, table, and the draft.
pub fn render_manager<A: SessionApi>(manager: &SessionManager<A>) -> String {
    let mut lines = vec![format!("{}", "Sessions".bold())];

    if let Some(error) = manager.error() {
        lines.push(format!("{}", error.red()));
    }

    let filters = manager.active_filters();
    if !filters.is_empty() {
        let mut parts = Vec::new();
        if let Some(s) = &filters.speaker {
            parts.push(format!("speaker={s}"));
        }
        if let Some(p) = filters.priority {
            parts.push(format!("priority={p}"));
        }
        if let Some(from) = &filters.start_date_time {
            parts.push(format!("from={from}"));
        }
        if let Some(to) = &filters.end_date_time {
            parts.push(format!("to={to}"));
        }
        lines.push(format!("Filters: {}", parts.join(", ")).dimmed().to_string());
    }

    lines.push(render_table(manager.page()));

    if let Some(id) = manager.editing_id() {
        lines.push(format!("{} {}", format!("Editing #{id}:").yellow(), manager.draft().render()));
    }

    lines.join("\n")
}

/// Format a date as a human-readable label (e.g. "Wed Oct 22")
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%a %b %-d").to_string()
}
