//! Persisted colour theme (`light` / `dark`) under the `theme` storage key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::surface::KeyValueStore;

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Saved theme, or the OS preference on first visit (which is then saved).
pub fn load_theme(storage: &dyn KeyValueStore, prefers_dark: bool) -> Theme {
    let saved = storage
        .get(THEME_KEY)
        .map_err(|e| tracing::warn!(error = %e, "could not read theme"))
        .ok()
        .flatten()
        .and_then(|raw| raw.parse::<Theme>().ok());
    if let Some(theme) = saved {
        return theme;
    }

    let theme = if prefers_dark { Theme::Dark } else { Theme::Light };
    save_theme(storage, theme);
    theme
}

pub fn save_theme(storage: &dyn KeyValueStore, theme: Theme) {
    if let Err(e) = storage.set(THEME_KEY, theme.as_str()) {
        tracing::warn!(error = %e, "could not save theme");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_first_visit_follows_os_and_persists() {
        let storage = MemoryStorage::new();
        assert_eq!(load_theme(&storage, true), Theme::Dark);
        assert_eq!(storage.peek(THEME_KEY), Some("dark".to_string()));
        // Saved choice now wins over the OS preference.
        assert_eq!(load_theme(&storage, false), Theme::Dark);
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(load_theme(&storage, false), Theme::Light);
        assert_eq!(storage.peek(THEME_KEY), Some("light".to_string()));
    }
}
