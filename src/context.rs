//! Application state assembled once at startup and handed to commands.

use anyhow::{Context, Result};
use chrono::Weekday;
use log::debug;
use minical_core::EventCollection;
use minical_core::config::MinicalConfig;
use minical_core::layout::parse_week_start;
use minical_core::settings::SettingsStore;
use minical_core::theme::{Appearance, Theme};

pub struct AppContext {
    pub config: MinicalConfig,
    pub week_start: Weekday,
    store: Box<dyn SettingsStore>,
}

impl AppContext {
    /// Load config and open the settings store it points at.
    pub fn load(week_start_override: Option<&str>) -> Result<Self> {
        let config = MinicalConfig::load().context("Failed to load minical config")?;
        let store = config.settings_store();
        debug!("Settings file: {}", store.path().display());
        Self::new(config, Box::new(store), week_start_override)
    }

    pub fn new(
        config: MinicalConfig,
        store: Box<dyn SettingsStore>,
        week_start_override: Option<&str>,
    ) -> Result<Self> {
        let week_start = match week_start_override {
            Some(value) => parse_week_start(value)?,
            None => config.week_start()?,
        };

        debug!(
            "Week starts on {}, export zone {}",
            week_start,
            config.timezone.as_deref().unwrap_or("system local")
        );

        Ok(AppContext {
            config,
            week_start,
            store,
        })
    }

    pub fn events(&self) -> Result<EventCollection> {
        Ok(self.store.load_events()?)
    }

    pub fn save_events(&mut self, events: &EventCollection) -> Result<()> {
        self.store
            .save_events(events)
            .context("Failed to save events")
    }

    pub fn theme(&self) -> Result<Theme> {
        Ok(self.store.load_theme()?)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.save_theme(theme).context("Failed to save theme")
    }

    pub fn appearance(&self) -> Result<Appearance> {
        Ok(self.theme()?.resolve(terminal_prefers_dark()))
    }
}

/// Guess the terminal background from `COLORFGBG` ("fg;bg", bg 0-6 or 8 is dark).
fn terminal_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_from_colorfgbg)
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

fn background_from_colorfgbg(value: &str) -> Option<u8> {
    value.rsplit(';').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minical_core::settings::MemorySettingsStore;

    fn context(week_start: Option<&str>) -> Result<AppContext> {
        AppContext::new(
            MinicalConfig::default(),
            Box::new(MemorySettingsStore::new()),
            week_start,
        )
    }

    #[test]
    fn week_start_defaults_to_sunday() {
        assert_eq!(context(None).unwrap().week_start, Weekday::Sun);
    }

    #[test]
    fn week_start_override_wins() {
        assert_eq!(context(Some("monday")).unwrap().week_start, Weekday::Mon);
        assert!(context(Some("blursday")).is_err());
    }

    #[test]
    fn theme_round_trips_through_store() {
        let mut ctx = context(None).unwrap();
        assert_eq!(ctx.theme().unwrap(), Theme::Light);
        ctx.save_theme(Theme::Dark).unwrap();
        assert_eq!(ctx.appearance().unwrap(), Appearance::Dark);
    }

    #[test]
    fn colorfgbg_background() {
        assert_eq!(background_from_colorfgbg("15;0"), Some(0));
        assert_eq!(background_from_colorfgbg("0;default;15"), Some(15));
        assert_eq!(background_from_colorfgbg("garbage"), None);
    }
}
