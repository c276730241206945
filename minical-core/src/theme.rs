//! Theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalError;

/// The theme a user picked. Persisted as `LightTheme`, `DarkTheme` or `SystemTheme`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "LightTheme")]
    Light,
    #[serde(rename = "DarkTheme")]
    Dark,
    /// Follow the host's light/dark preference
    #[serde(rename = "SystemTheme")]
    System,
}

/// A theme after `System` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Theme {
    pub fn resolve(self, system_prefers_dark: bool) -> Appearance {
        match self {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
            Theme::System if system_prefers_dark => Appearance::Dark,
            Theme::System => Appearance::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "lighttheme" => Ok(Theme::Light),
            "dark" | "darktheme" => Ok(Theme::Dark),
            "system" | "systemtheme" => Ok(Theme::System),
            other => Err(CalError::InvalidArgument(format!(
                "Unknown theme '{}'. Expected light, dark or system",
                other
            ))),
        }
    }
}
