use anyhow::Result;
use minical_core::config::MinicalConfig;
use owo_colors::OwoColorize;

use crate::context::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    let config_path = MinicalConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Settings:   {}", ctx.config.settings_store().path().display());

    println!("{}", "Calendar".bold());
    println!("  Week start: {}", ctx.week_start);
    println!(
        "  Time zone:  {}",
        ctx.config.timezone.as_deref().unwrap_or("system local")
    );

    Ok(())
}
