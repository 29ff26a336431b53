use anyhow::{Context, Result};
use eventplan_core::{HttpSessionClient, SessionApi};
use owo_colors::OwoColorize;

use super::SessionFields;
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn create(client: &HttpSessionClient, fields: SessionFields) -> Result<()> {
    let draft = fields.into_session(None);

    let created = with_spinner("Creating session...", client.create_session(&draft))
        .await
        .context("Could not create session")?;

    let id = created.id.map(|id| format!("#{id} ")).unwrap_or_default();
    println!("{} {}", format!("  Created {id}").green(), created.render());
    Ok(())
}

pub async fn update(client: &HttpSessionClient, id: i64, fields: SessionFields) -> Result<()> {
    let session = fields.into_session(Some(id));

    let updated = with_spinner("Updating session...", client.update_session(id, &session))
        .await
        .with_context(|| format!("Could not update session {id}"))?;

    println!("{} {}", format!("  Updated #{id}").green(), updated.render());
    Ok(())
}
