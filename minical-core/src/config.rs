//! User configuration at `<config dir>/minical/config.toml`.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalError, CalResult};
use crate::ics::{DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN, ExportOptions};
use crate::layout::parse_week_start;
use crate::settings::JsonSettingsStore;

static DEFAULT_DATA_PATH: &str = "~/.minical";

/// Used when neither the config nor the command line names a week start.
pub const DEFAULT_WEEK_START: Weekday = Weekday::Sun;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinicalConfig {
    /// Directory holding settings.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// First column of the month grid, e.g. "monday"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<String>,

    /// IANA zone used to interpret event times on export. System local time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_product_id")]
    pub product_id: String,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

impl Default for MinicalConfig {
    fn default() -> Self {
        MinicalConfig {
            data_dir: default_data_dir(),
            week_start: None,
            timezone: None,
            product_id: default_product_id(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl MinicalConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalError::Config("Could not determine config directory".into()))?
            .join("minical");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented default on first run.
    /// `MINICAL_*` environment variables override file values.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalResult<Self> {
        let config: MinicalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("MINICAL"))
            .build()
            .map_err(|e| CalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalError::Config(e.to_string()))?;

        // Surface bad values at load time rather than on first use
        config.week_start()?;
        config.time_zone()?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# minical configuration

# Where events and the theme preference are stored:
# data_dir = \"{}\"

# First day of the week in the month grid:
# week_start = \"monday\"

# Time zone for event times when exporting (defaults to system local time):
# timezone = \"Europe/Berlin\"

# Identity written into exported .ics files:
# product_id = \"{}\"
# uid_domain = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn week_start(&self) -> CalResult<Weekday> {
        match self.week_start.as_deref() {
            Some(value) => parse_week_start(value),
            None => Ok(DEFAULT_WEEK_START),
        }
    }

    /// Configured export zone, `None` for system local time.
    pub fn time_zone(&self) -> CalResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| CalError::Config(format!("Unknown timezone '{}': {}", name, e)))
            })
            .transpose()
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            product_id: self.product_id.clone(),
            uid_domain: self.uid_domain.clone(),
        }
    }

    pub fn settings_store(&self) -> JsonSettingsStore {
        JsonSettingsStore::in_dir(self.data_path())
    }
}
