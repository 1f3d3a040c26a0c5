//! Widget settings persistence.
//!
//! Settings travel as an opaque JSON string blob stamped with a semantic
//! version on every save. The settings object itself is an open JSON map:
//! fields from older or newer versions merge as plain JSON, no migration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Version stamped onto every serialized settings envelope.
pub const SETTINGS_VERSION: SettingsVersion = SettingsVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

/// Semantic version triple attached to persisted settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

/// User-chosen widget configuration.
///
/// Currently an open bag of JSON fields; the widget defines no typed
/// settings yet, so everything merges shallowly by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Settings fields, keyed by name.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl WidgetSettings {
    /// True when no fields are set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }
}

/// The persisted settings envelope handed to and from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSettings {
    /// JSON-serialized [`WidgetSettings`].
    pub data: String,
    /// Version supplied at save time.
    pub version: SettingsVersion,
}

/// Outcome of loading persisted settings.
///
/// Loading never fails the caller; corrupt or absent data degrades to empty
/// settings, and this value makes the degradation observable so the caller
/// can log it.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsLoad {
    /// The blob parsed and the settings were adopted.
    Parsed,
    /// No persisted data existed; settings reset to empty.
    DefaultedEmpty,
    /// The blob was not valid JSON; settings reset to empty.
    DefaultedCorrupt(String),
}

impl SettingsLoad {
    /// The parse failure message, when the blob was corrupt.
    pub fn corruption(&self) -> Option<&str> {
        match self {
            Self::DefaultedCorrupt(message) => Some(message),
            _ => None,
        }
    }
}

/// Store lifecycle phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StorePhase {
    /// No load has happened yet.
    Unloaded,
    /// Settings were loaded (possibly defaulted).
    Loaded,
    /// At least one update was merged since the last load or save.
    Editing,
    /// The current settings were handed out for persistence.
    Saved,
}

/// Validates settings before a save is allowed.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsValidator {
    /// True when the settings may be persisted.
    fn validate(&self, settings: &WidgetSettings) -> bool;
}

/// Default validator; accepts everything, as the widget defines no
/// constraints yet.
#[derive(Debug, Default, Clone)]
pub struct AlwaysValid;

impl SettingsValidator for AlwaysValid {
    fn validate(&self, _settings: &WidgetSettings) -> bool {
        true
    }
}

/// Result of a save request.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    /// Settings validated; the envelope is ready to persist.
    Valid(CustomSettings),
    /// Validation failed; the host should block the save and keep the
    /// configuration surface open.
    Invalid,
}

/// Owns a widget instance's settings across its load/update/save lifecycle.
pub struct SettingsStore<V = AlwaysValid> {
    settings: WidgetSettings,
    validator: V,
    phase: StorePhase,
}

impl SettingsStore<AlwaysValid> {
    /// Create an unloaded store with the default validator.
    pub fn new() -> Self {
        Self::with_validator(AlwaysValid)
    }
}

impl Default for SettingsStore<AlwaysValid> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SettingsValidator> SettingsStore<V> {
    /// Create an unloaded store with a custom validator.
    pub fn with_validator(validator: V) -> Self {
        Self {
            settings: WidgetSettings::default(),
            validator,
            phase: StorePhase::Unloaded,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Load settings from the raw persisted blob.
    ///
    /// Absent or corrupt data degrades to empty settings; the returned
    /// [`SettingsLoad`] names what happened. Never fails the caller.
    pub fn load(&mut self, raw: Option<&str>) -> SettingsLoad {
        let outcome = match raw {
            None => {
                self.settings = WidgetSettings::default();
                SettingsLoad::DefaultedEmpty
            }
            Some(raw) if raw.trim().is_empty() => {
                self.settings = WidgetSettings::default();
                SettingsLoad::DefaultedEmpty
            }
            Some(raw) => match serde_json::from_str::<WidgetSettings>(raw) {
                Ok(parsed) => {
                    self.settings = parsed;
                    SettingsLoad::Parsed
                }
                Err(error) => {
                    self.settings = WidgetSettings::default();
                    SettingsLoad::DefaultedCorrupt(error.to_string())
                }
            },
        };
        self.phase = StorePhase::Loaded;
        outcome
    }

    /// Merge a partial settings object shallowly; later fields win.
    ///
    /// Returns the serialized envelope used to notify the host of the
    /// pending change.
    pub fn update(&mut self, partial: &WidgetSettings) -> Result<CustomSettings> {
        for (key, value) in &partial.fields {
            self.settings.fields.insert(key.clone(), value.clone());
        }
        self.phase = StorePhase::Editing;
        self.serialize()
    }

    /// Validate and hand out the settings for persistence.
    ///
    /// All-or-nothing: either the whole settings object is released as
    /// [`SaveStatus::Valid`] or the save is blocked.
    pub fn save(&mut self) -> SaveStatus {
        if !self.validator.validate(&self.settings) {
            return SaveStatus::Invalid;
        }
        match self.serialize() {
            Ok(custom) => {
                self.phase = StorePhase::Saved;
                SaveStatus::Valid(custom)
            }
            Err(_) => SaveStatus::Invalid,
        }
    }

    fn serialize(&self) -> Result<CustomSettings> {
        let data = serde_json::to_string(&self.settings)?;
        Ok(CustomSettings {
            data,
            version: SETTINGS_VERSION,
        })
    }
}
