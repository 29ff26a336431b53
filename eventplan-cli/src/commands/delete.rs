use anyhow::{Context, Result};
use eventplan_core::{HttpSessionClient, SessionApi};
use owo_colors::OwoColorize;

use crate::utils::tui::with_spinner;

pub async fn run(client: &HttpSessionClient, id: i64) -> Result<()> {
    with_spinner("Deleting session...", client.delete_session(id))
        .await
        .with_context(|| format!("Could not delete session {id}"))?;

    println!("{}", format!("  Deleted session #{id}").green());
    Ok(())
}
