//! Saved items: an ordered list, unique by id, persisted after every mutation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::local_store::{KeyValueStore, SAVED_KEY};
use crate::query::MediaKind;

/// A user-curated reference to a media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: u64,
    /// Thumbnail URL.
    pub img: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub creator: String,
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

pub struct SavedStore {
    items: Vec<SavedItem>,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for SavedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedStore").field("items", &self.items).finish()
    }
}

impl SavedStore {
    /// Load the list once. A missing, unreadable or unparseable record is an
    /// empty list.
    pub fn load(store: impl KeyValueStore + 'static) -> Self {
        let raw = store.get(SAVED_KEY).unwrap_or_else(|e| {
            tracing::warn!("saved items unreadable, starting empty: {:#}", e);
            None
        });
        let items = match raw {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<SavedItem>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("saved items unparseable, starting empty: {}", e);
                Vec::new()
            }),
        };
        let mut items_unique: Vec<SavedItem> = Vec::with_capacity(items.len());
        for item in items {
            if !items_unique.iter().any(|s| s.id == item.id) {
                items_unique.push(item);
            }
        }
        tracing::debug!(count = items_unique.len(), "saved items loaded");
        Self {
            items: items_unique,
            store: Box::new(store),
        }
    }

    pub fn items(&self) -> &[SavedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_saved(&self, id: u64) -> bool {
        self.items.iter().any(|s| s.id == id)
    }

    /// Add if absent, remove if present. On a failed write the list is left
    /// as it was.
    pub fn toggle(&mut self, id: u64, img: &str, kind: MediaKind, creator: &str) -> Result<Toggled> {
        let mut next = self.items.clone();
        let outcome = match self.position(id) {
            Some(idx) => {
                next.remove(idx);
                Toggled::Removed
            }
            None => {
                next.push(SavedItem {
                    id,
                    img: img.to_string(),
                    kind,
                    creator: creator.to_string(),
                });
                Toggled::Added
            }
        };
        self.commit(next)?;
        Ok(outcome)
    }

    /// Remove `id` if present. Returns false (and persists nothing) when absent.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };
        let mut next = self.items.clone();
        next.remove(idx);
        self.commit(next)?;
        Ok(true)
    }

    /// Empty the list unconditionally.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|s| s.id == id)
    }

    /// Persist `next`, then make it the current list.
    fn commit(&mut self, next: Vec<SavedItem>) -> Result<()> {
        let json = serde_json::to_string(&next).context("serialize saved items")?;
        self.store.set(SAVED_KEY, &json)?;
        self.items = next;
        Ok(())
    }
}
