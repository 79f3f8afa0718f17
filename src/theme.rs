//! Persisted light/dark preference.

use std::collections::HashMap;

pub const THEME_KEY: &str = "showcase-theme";
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "◐",
            Self::Dark => "◑",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("preference write rejected: {0}")]
    Rejected(String),
}

pub trait PreferenceStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Session-only storage, used when the host exposes no persistent store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct ThemeStore<S> {
    storage: S,
    current: Theme,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Absent and unrecognized values both resolve to light.
    pub fn load(storage: S) -> Self {
        let current = storage
            .read(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(Theme::Light);

        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Persists first; the in-memory value only flips once the write succeeds.
    pub fn toggle(&mut self) -> Result<Theme, PreferenceError> {
        let next = self.current.toggled();
        self.storage.write(THEME_KEY, next.as_str())?;
        self.current = next;
        Ok(next)
    }

    #[cfg(test)]
    fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStorage;

    impl PreferenceStorage for ReadOnlyStorage {
        fn read(&self, _key: &str) -> Option<String> {
            Some("dark".to_string())
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Rejected("quota exceeded".to_string()))
        }
    }

    #[test]
    fn missing_preference_defaults_to_light() {
        let store = ThemeStore::load(MemoryStorage::default());
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn corrupt_preference_matches_missing() {
        for raw in ["", "Dark", "midnight", "{\"theme\":\"dark\"}"] {
            let store = ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, raw));
            assert_eq!(store.current(), Theme::Light, "value {raw:?}");
        }
    }

    #[test]
    fn stored_dark_is_restored() {
        let store = ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, "dark"));
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn toggling_twice_round_trips_value_and_storage() {
        let mut store = ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, "light"));

        assert_eq!(store.toggle(), Ok(Theme::Dark));
        assert_eq!(store.storage().read(THEME_KEY).as_deref(), Some("dark"));
        assert!(store.current().is_dark());

        assert_eq!(store.toggle(), Ok(Theme::Light));
        assert_eq!(store.storage().read(THEME_KEY).as_deref(), Some("light"));
        assert!(!store.current().is_dark());
    }

    #[test]
    fn failed_write_leaves_theme_unchanged() {
        let mut store = ThemeStore::load(ReadOnlyStorage);
        assert_eq!(store.current(), Theme::Dark);

        let err = store.toggle().unwrap_err();
        assert_eq!(err.to_string(), "preference write rejected: quota exceeded");
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn toggle_label_names_the_next_theme() {
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
    }
}
