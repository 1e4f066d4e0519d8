//! Card view models and the append-only feed.
//!
//! `card_for` is a pure mapping from a media item to what a card shows.
//! Drawing cards is the job of a [`Surface`](crate::surface::Surface).

use crate::media::MediaItem;
use crate::query::MediaKind;
use crate::saved::SavedStore;

/// Card background when the item has no dominant color.
pub const DEFAULT_ACCENT: &str = "#333";
/// Alt text when the item has no description.
pub const DEFAULT_ALT: &str = "Stock Media";

/// What a grid card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub kind: MediaKind,
    pub thumbnail: String,
    pub download_url: Option<String>,
    pub creator: String,
    pub alt: String,
    pub accent: String,
    pub saved: bool,
}

impl Card {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Videos
    }

    /// File name used when the card's media is downloaded.
    pub fn download_filename(&self) -> String {
        download_filename(self.id, self.kind)
    }
}

/// `pixelpro-<id>.<ext>` for the given kind.
pub fn download_filename(id: u64, kind: MediaKind) -> String {
    format!("pixelpro-{}.{}", id, kind.file_extension())
}

/// Build the card for one item.
pub fn card_for(item: &MediaItem, kind: MediaKind, saved: &SavedStore) -> Card {
    Card {
        id: item.id,
        kind,
        thumbnail: item.thumbnail_url(kind).unwrap_or_default().to_string(),
        download_url: item.download_url(kind).map(str::to_string),
        creator: item.creator_name().to_string(),
        alt: item.description().unwrap_or(DEFAULT_ALT).to_string(),
        accent: item
            .avg_color
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_ACCENT.to_string()),
        saved: saved.is_saved(item.id),
    }
}

/// One displayed card and the item behind it.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub item: MediaItem,
    pub card: Card,
}

/// Displayed results, grown incrementally by infinite scroll.
#[derive(Debug, Default)]
pub struct Feed {
    entries: Vec<FeedEntry>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&FeedEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.entries.iter().map(|e| &e.card)
    }

    /// Append cards for `items`; returns the index of the first new entry.
    pub fn append(&mut self, items: Vec<MediaItem>, kind: MediaKind, saved: &SavedStore) -> usize {
        let first = self.entries.len();
        self.entries.extend(items.into_iter().map(|item| {
            let card = card_for(&item, kind, saved);
            FeedEntry { item, card }
        }));
        first
    }

    /// Re-read the saved state of one card. Returns the updated card.
    pub fn refresh_saved(&mut self, index: usize, saved: &SavedStore) -> Option<&Card> {
        let entry = self.entries.get_mut(index)?;
        entry.card.saved = saved.is_saved(entry.card.id);
        Some(&entry.card)
    }

    /// Re-read the saved state of every card showing `id`. Returns their indices.
    pub fn refresh_saved_id(&mut self, id: u64, saved: &SavedStore) -> Vec<usize> {
        let now = saved.is_saved(id);
        self.entries
            .iter_mut()
            .enumerate()
            .filter(|(_, e)| e.card.id == id && e.card.saved != now)
            .map(|(i, e)| {
                e.card.saved = now;
                i
            })
            .collect()
    }
}
