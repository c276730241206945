//! Persistence of the event collection and theme preference.
//!
//! The application receives a [`SettingsStore`] at startup and calls it
//! explicitly to load and save. Malformed persisted data never fails a load:
//! events fall back to an empty collection and the theme to light.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::collection::EventCollection;
use crate::error::{CalError, CalResult};
use crate::event::CalendarEvent;
use crate::theme::Theme;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

const EVENTS_KEY: &str = "Events";
const THEME_KEY: &str = "Theme";

/// Load/save service for persisted application state.
pub trait SettingsStore {
    fn load_events(&self) -> CalResult<EventCollection>;
    fn save_events(&mut self, events: &EventCollection) -> CalResult<()>;
    fn load_theme(&self) -> CalResult<Theme>;
    fn save_theme(&mut self, theme: Theme) -> CalResult<()>;
}

/// Parse a serialized event list.
///
/// Accepts either a JSON array or a JSON string whose contents are an array.
pub fn parse_events(value: Value) -> CalResult<Vec<CalendarEvent>> {
    let value = match value {
        Value::String(text) => {
            serde_json::from_str(&text).map_err(|e| CalError::Deserialization(e.to_string()))?
        }
        Value::Null => return Ok(Vec::new()),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| CalError::Deserialization(e.to_string()))
}

fn events_or_empty(value: Option<Value>) -> EventCollection {
    let Some(value) = value else {
        return EventCollection::new();
    };
    match parse_events(value) {
        Ok(events) => EventCollection::from_events(events),
        Err(e) => {
            warn!("Ignoring stored events: {}", e);
            EventCollection::new()
        }
    }
}

fn theme_or_default(value: Option<Value>) -> Theme {
    let Some(value) = value else {
        return Theme::default();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Ignoring stored theme: {}", e);
        Theme::default()
    })
}

/// Settings kept in a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `<dir>/settings.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing or unparseable file is an empty document.
    fn read_document(&self) -> CalResult<Map<String, Value>> {
        if !self.path.exists() {
            debug!("No settings at {}", self.path.display());
            return Ok(Map::new());
        }

        let content = std::fs::read(&self.path)?;
        match serde_json::from_slice::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!("Settings at {} are not a JSON object", self.path.display());
                Ok(Map::new())
            }
            Err(e) => {
                warn!("Could not parse settings at {}: {}", self.path.display(), e);
                Ok(Map::new())
            }
        }
    }

    /// Replace one key, preserving the rest of the document.
    fn write_key(&self, key: &str, value: Value) -> CalResult<()> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| CalError::Serialization(e.to_string()))?;
        // Replace atomically: a partial write never lands on the real file
        let temp = self.temp_path();
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SETTINGS_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load_events(&self) -> CalResult<EventCollection> {
        let mut document = self.read_document()?;
        let events = events_or_empty(document.remove(EVENTS_KEY));
        debug!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    fn save_events(&mut self, events: &EventCollection) -> CalResult<()> {
        let value =
            serde_json::to_value(events).map_err(|e| CalError::Serialization(e.to_string()))?;
        self.write_key(EVENTS_KEY, value)?;
        info!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }

    fn load_theme(&self) -> CalResult<Theme> {
        let mut document = self.read_document()?;
        Ok(theme_or_default(document.remove(THEME_KEY)))
    }

    fn save_theme(&mut self, theme: Theme) -> CalResult<()> {
        let value =
            serde_json::to_value(theme).map_err(|e| CalError::Serialization(e.to_string()))?;
        self.write_key(THEME_KEY, value)
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    events: EventCollection,
    theme: Theme,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: EventCollection) -> Self {
        MemorySettingsStore {
            events,
            ..Self::default()
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_events(&self) -> CalResult<EventCollection> {
        Ok(self.events.clone())
    }

    fn save_events(&mut self, events: &EventCollection) -> CalResult<()> {
        self.events = events.clone();
        Ok(())
    }

    fn load_theme(&self) -> CalResult<Theme> {
        Ok(self.theme)
    }

    fn save_theme(&mut self, theme: Theme) -> CalResult<()> {
        self.theme = theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_events_accepts_embedded_string() {
        let blob = json!(
            "[{\"Id\":\"6f1c0a52-3a7e-4c1b-9a57-2d0c7c1f9e10\",\"Title\":\"Dentist\",\"Date\":\"2024-03-15T10:00:00\",\"Description\":null}]"
        );
        let events = parse_events(blob).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Dentist");
    }

    #[test]
    fn parse_events_rejects_malformed_data() {
        assert!(matches!(
            parse_events(json!({"not": "a list"})),
            Err(CalError::Deserialization(_))
        ));
        assert!(matches!(
            parse_events(json!("[{broken")),
            Err(CalError::Deserialization(_))
        ));
    }

    #[test]
    fn malformed_values_degrade() {
        assert!(events_or_empty(Some(json!(42))).is_empty());
        assert!(events_or_empty(None).is_empty());
        assert_eq!(theme_or_default(Some(json!("NeonTheme"))), Theme::Light);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemorySettingsStore::new();
        assert!(store.load_events().unwrap().is_empty());

        let mut events = EventCollection::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        events.add(CalendarEvent::new("standup", date, None)).unwrap();
        store.save_events(&events).unwrap();
        store.save_theme(Theme::Dark).unwrap();

        assert_eq!(store.load_events().unwrap(), events);
        assert_eq!(store.load_theme().unwrap(), Theme::Dark);
    }
}
