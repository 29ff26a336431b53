use anyhow::Result;
use chrono_tz::Tz;
use eventplan_core::HttpSessionClient;
use eventplan_core::manager::{SearchFields, SessionManager};

use crate::render;
use crate::utils::tui::with_spinner;

pub async fn run(
    client: HttpSessionClient,
    tz: Tz,
    page: u32,
    size: u32,
    search: SearchFields,
) -> Result<()> {
    let filters = search.to_filter_set(&tz)?;

    let mut manager = SessionManager::new(client, tz).with_page_size(size);
    manager.search = search;

    with_spinner("Loading sessions...", manager.load(page, size, filters)).await;

    if let Some(error) = manager.error() {
        anyhow::bail!("{}", error);
    }

    println!("{}", render::render_manager(&manager));
    Ok(())
}
