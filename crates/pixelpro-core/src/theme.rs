//! Light/dark preference, persisted independently of the saved list.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::local_store::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Stored theme, light when absent or unrecognised.
pub fn load(store: &dyn KeyValueStore) -> Result<Theme> {
    Ok(store
        .get(THEME_KEY)?
        .as_deref()
        .and_then(Theme::parse)
        .unwrap_or_default())
}

/// Like [`load`], but an unreadable store also gives the default.
pub fn load_or_default(store: &dyn KeyValueStore) -> Theme {
    load(store).unwrap_or_else(|e| {
        tracing::warn!("theme unreadable, using default: {:#}", e);
        Theme::default()
    })
}

pub fn save(store: &mut dyn KeyValueStore, theme: Theme) -> Result<()> {
    store.set(THEME_KEY, theme.as_str())
}
