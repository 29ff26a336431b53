use anyhow::Result;
use eventplan_core::EventPlanConfig;
use owo_colors::OwoColorize;

pub fn run(config: &EventPlanConfig) -> Result<()> {
    let config_path = EventPlanConfig::config_path()?;
    let zone = config.timezone()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Backend".bold());
    println!("  Sessions:   {}", config.sessions_url());
    println!();
    println!("{}", "Display".bold());
    println!(
        "  Time zone:  {}{}",
        zone,
        if config.timezone.is_none() { " (system)".dimmed().to_string() } else { String::new() }
    );
    println!("  Page size:  {}", config.page_size);
    println!("  Calendar:   up to {} sessions per month", config.calendar_fetch_size);

    Ok(())
}
