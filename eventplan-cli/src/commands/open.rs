use anyhow::Result;
use chrono_tz::Tz;
use dialoguer::{Confirm, Input, Select};
use eventplan_core::query::parse_date_input;
use eventplan_core::{EventPlanConfig, HttpSessionClient, Session, SessionApi};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::routes::{Route, SessionsPage};
use crate::utils::tui::with_spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    PreviousMonth,
    NextMonth,
    FilterCalendar,
    ClearCalendarFilters,
    PreviousPage,
    NextPage,
    Search,
    ClearSearch,
    Draft,
    Edit,
    CancelEdit,
    Delete,
    Reload,
    Quit,
}

pub async fn run(
    client: HttpSessionClient,
    config: &EventPlanConfig,
    tz: Tz,
    route: Route,
) -> Result<()> {
    let mut page = SessionsPage::compose(route, client, config, tz);
    with_spinner("Loading...", page.load()).await;

    loop {
        println!("\n{}\n", page.render());

        let actions = available_actions(&page);
        let labels: Vec<String> = actions.iter().map(|a| label(*a, &page)).collect();

        let Some(choice) = Select::new()
            .with_prompt("  Action")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        if !perform(actions[choice], &mut page).await? {
            break;
        }

        page.sync().await;
    }

    Ok(())
}

fn available_actions<A: SessionApi>(page: &SessionsPage<A>) -> Vec<Action> {
    let mut actions = Vec::new();
    let manager = &page.manager;

    if page.calendar.is_some() {
        actions.extend([
            Action::PreviousMonth,
            Action::NextMonth,
            Action::FilterCalendar,
            Action::ClearCalendarFilters,
        ]);
    }
    if manager.has_previous() {
        actions.push(Action::PreviousPage);
    }
    if manager.has_next() {
        actions.push(Action::NextPage);
    }
    actions.extend([Action::Search, Action::ClearSearch, Action::Draft]);
    if !manager.sessions().is_empty() {
        actions.extend([Action::Edit, Action::Delete]);
    }
    if manager.is_editing() {
        actions.push(Action::CancelEdit);
    }
    actions.extend([Action::Reload, Action::Quit]);
    actions
}

fn label<A: SessionApi>(action: Action, page: &SessionsPage<A>) -> String {
    let manager = &page.manager;
    match action {
        Action::PreviousMonth => "‹ Previous month".into(),
        Action::NextMonth => "Next month ›".into(),
        Action::FilterCalendar => "Filter calendar".into(),
        Action::ClearCalendarFilters => "Clear calendar filters".into(),
        Action::PreviousPage => "‹ Previous page".into(),
        Action::NextPage => "Next page ›".into(),
        Action::Search => "Search sessions".into(),
        Action::ClearSearch => "Clear search".into(),
        Action::Draft => match manager.editing_id() {
            Some(id) => format!("Save changes to #{id}"),
            None if manager.draft() != &Session::default() => "Continue draft".into(),
            None => "New session".into(),
        },
        Action::Edit => "Edit session".into(),
        Action::CancelEdit => "Cancel edit".into(),
        Action::Delete => "Delete session".into(),
        Action::Reload => "Reload".into(),
        Action::Quit => "Quit".into(),
    }
}

/// Returns `false` when the page should close.
async fn perform<A: SessionApi>(action: Action, page: &mut SessionsPage<A>) -> Result<bool> {
    match action {
        Action::PreviousMonth | Action::NextMonth => {
            let delta = if action == Action::NextMonth { 1 } else { -1 };
            if let Some(calendar) = page.calendar.as_mut() {
                with_spinner("Loading calendar...", calendar.change_month(delta)).await;
            }
        }
        Action::FilterCalendar => {
            if let Some(calendar) = page.calendar.as_mut() {
                let speaker = prompt_text("  Speaker (any)", &calendar.speaker)?;
                let priority = prompt_text("  Priority (any)", &calendar.priority)?;
                let from = prompt_text("  From (YYYY-MM-DD)", &calendar.start_date().to_string())?;
                let to = prompt_text("  To (YYYY-MM-DD)", &calendar.end_date().to_string())?;

                match (parse_date_input(&from), parse_date_input(&to)) {
                    (Ok(Some(from)), Ok(Some(to))) => {
                        with_spinner(
                            "Loading calendar...",
                            calendar.apply_filters(speaker, priority, from, to),
                        )
                        .await;
                    }
                    (Err(e), _) | (_, Err(e)) => eprintln!("  {}", e.red()),
                    _ => eprintln!("  {}", "Both dates are required for the calendar".red()),
                }
            }
        }
        Action::ClearCalendarFilters => {
            if let Some(calendar) = page.calendar.as_mut() {
                with_spinner("Loading calendar...", calendar.clear_filters()).await;
            }
        }
        Action::PreviousPage => {
            with_spinner("Loading sessions...", page.manager.previous_page()).await;
        }
        Action::NextPage => {
            with_spinner("Loading sessions...", page.manager.next_page()).await;
        }
        Action::Search => {
            let search = &mut page.manager.search;
            search.speaker = prompt_text("  Speaker", &search.speaker)?;
            search.priority = prompt_text("  Priority", &search.priority)?;
            search.start_date = prompt_text("  From (YYYY-MM-DD)", &search.start_date)?;
            search.end_date = prompt_text("  To (YYYY-MM-DD)", &search.end_date)?;
            with_spinner("Searching...", page.manager.apply_search()).await;
        }
        Action::ClearSearch => {
            with_spinner("Loading sessions...", page.manager.clear_search()).await;
        }
        Action::Draft => {
            prompt_draft(page.manager.draft_mut())?;
            with_spinner("Saving...", page.manager.submit()).await;
        }
        Action::Edit => {
            if let Some(session) = pick_session(page.manager.sessions(), "  Edit which session?")? {
                page.manager.start_edit(&session);
                prompt_draft(page.manager.draft_mut())?;
                with_spinner("Saving...", page.manager.submit()).await;
            }
        }
        Action::CancelEdit => page.manager.cancel_edit(),
        Action::Delete => {
            if let Some(session) = pick_session(page.manager.sessions(), "  Delete which session?")? {
                let confirmed = Confirm::new()
                    .with_prompt(format!("  Delete \"{}\"?", session))
                    .default(false)
                    .interact()?;
                if confirmed {
                    with_spinner("Deleting...", page.manager.remove(session.id)).await;
                }
            }
        }
        Action::Reload => {
            if let Some(calendar) = page.calendar.as_mut() {
                with_spinner("Loading calendar...", calendar.load()).await;
            }
            with_spinner("Loading sessions...", page.manager.reload()).await;
        }
        Action::Quit => return Ok(false),
    }

    Ok(true)
}

fn pick_session(sessions: &[Session], prompt: &str) -> Result<Option<Session>> {
    let items: Vec<String> = sessions.iter().map(Render::render).collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| sessions[i].clone()))
}

fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn prompt_optional(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let value = prompt_text(prompt, current.unwrap_or_default())?;
    Ok(if value.trim().is_empty() { None } else { Some(value) })
}

/// Fill the draft field by field, starting from its current values. The
/// title may be left blank; the backend decides what is acceptable.
fn prompt_draft(draft: &mut Session) -> Result<()> {
    draft.title = prompt_text("  Title", &draft.title)?;
    draft.speaker = prompt_optional("  Speaker (skip)", draft.speaker.as_deref())?;
    draft.start_date_time = prompt_optional(
        "  Start (YYYY-MM-DDTHH:MM:SS)",
        draft.start_date_time.as_deref(),
    )?;
    draft.end_date_time = prompt_optional(
        "  End (YYYY-MM-DDTHH:MM:SS)",
        draft.end_date_time.as_deref(),
    )?;
    draft.priority = prompt_priority(draft.priority)?;
    draft.vip = Some(
        Confirm::new()
            .with_prompt("  VIP?")
            .default(draft.is_vip())
            .interact()?,
    );
    Ok(())
}

/// Prompt for a priority with retry on parse errors.
fn prompt_priority(current: Option<i32>) -> Result<Option<i32>> {
    let current = current.map(|p| p.to_string()).unwrap_or_default();
    loop {
        let input = prompt_text("  Priority (1 high, 2 medium, 3 low)", &current)?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        match input.parse::<i32>() {
            Ok(p) => return Ok(Some(p)),
            Err(_) => eprintln!("  {}", format!("'{input}' is not a number").red()),
        }
    }
}
