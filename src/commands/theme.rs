use anyhow::Result;
use minical_core::Theme;

use crate::context::AppContext;

/// Show the current theme, or persist a new one.
pub fn run(ctx: &mut AppContext, theme: Option<String>) -> Result<()> {
    match theme {
        None => {
            let theme = ctx.theme()?;
            println!("{}", theme);
        }
        Some(name) => {
            let theme: Theme = name.parse()?;
            ctx.save_theme(theme)?;
            println!("Theme set to {}.", theme);
        }
    }
    Ok(())
}
