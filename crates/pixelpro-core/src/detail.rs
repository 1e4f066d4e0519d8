//! Detail view of one item: labels, derived tags, and related items.

use crate::failover::{self, FailoverOutcome};
use crate::http::Transport;
use crate::media::{MediaItem, SearchResponse};
use crate::proxy::ProxyResolver;
use crate::query::{self, MediaKind};
use crate::render;

/// Tag source when an item has no descriptive text.
pub const FALLBACK_TAG_TEXT: &str = "Stock, Creative, Design";
pub const MAX_TAGS: usize = 5;
/// Tokens this short or shorter are not tags.
const MAX_DISCARDED_LEN: usize = 3;

pub const UNTITLED: &str = "Untitled Artwork";
pub const NO_DESCRIPTION: &str = "No specific description provided.";

/// Split on whitespace/commas, drop short tokens, keep the first five.
///
/// Without descriptive text the fallback phrase is used; if still nothing
/// remains, the active search term is the only tag.
pub fn derive_tags(description: Option<&str>, active_query: &str) -> Vec<String> {
    let text = description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(FALLBACK_TAG_TEXT);
    let tags: Vec<String> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| t.chars().count() > MAX_DISCARDED_LEN)
        .take(MAX_TAGS)
        .map(str::to_string)
        .collect();
    if tags.is_empty() && !active_query.trim().is_empty() {
        return vec![active_query.trim().to_string()];
    }
    tags
}

/// Everything the detail overlay shows for its subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub item: MediaItem,
    pub kind: MediaKind,
    pub creator: String,
    pub creator_label: &'static str,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Enlarged image, or the video itself.
    pub preview_url: Option<String>,
    /// Original rendition.
    pub download_url: Option<String>,
    /// Query for the related-items strip.
    pub related_query: String,
}

impl DetailView {
    pub fn new(item: MediaItem, kind: MediaKind, active_query: &str) -> Self {
        let tags = derive_tags(item.description(), active_query);
        let related_query = tags
            .first()
            .cloned()
            .unwrap_or_else(|| active_query.to_string());
        let (title, description) = match item.description() {
            Some(alt) => (alt.to_string(), format!("A stunning high-quality shot of {}.", alt)),
            None => (UNTITLED.to_string(), NO_DESCRIPTION.to_string()),
        };
        Self {
            creator: item.creator_name().to_string(),
            creator_label: match kind {
                MediaKind::Photos => "Photographer",
                MediaKind::Videos => "Video Creator",
            },
            title,
            description,
            tags,
            preview_url: item.preview_url(kind).map(str::to_string),
            download_url: item.download_url(kind).map(str::to_string),
            related_query,
            item,
            kind,
        }
    }

    pub fn download_filename(&self) -> String {
        render::download_filename(self.item.id, self.kind)
    }
}

/// State of the related-items strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedOutcome {
    Pending,
    Items(Vec<MediaItem>),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedStrip {
    pub query: String,
    pub outcome: RelatedOutcome,
}

impl RelatedStrip {
    pub fn pending(query: &str) -> Self {
        Self {
            query: query.to_string(),
            outcome: RelatedOutcome::Pending,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        match &self.outcome {
            RelatedOutcome::Items(items) => items,
            _ => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items().get(index)
    }

    pub fn thumbnails(&self) -> Vec<&str> {
        self.items()
            .iter()
            .filter_map(MediaItem::small_thumbnail_url)
            .collect()
    }

    /// Placeholder text for states without thumbnails.
    pub fn message(&self) -> Option<&'static str> {
        match self.outcome {
            RelatedOutcome::Pending => Some("Finding related matches..."),
            RelatedOutcome::Empty => Some("No similar images found."),
            RelatedOutcome::Failed => Some("Could not load similar images."),
            RelatedOutcome::Items(_) => None,
        }
    }
}

/// Independent photo search for items related to `query`.
///
/// Shares the candidate resolution and failover of the main fetch but none of
/// its pagination state.
pub fn fetch_related<R>(
    transport: &R,
    resolver: &ProxyResolver,
    headers: &[(String, String)],
    query: &str,
    count: u32,
) -> RelatedStrip
where
    R: Transport + ?Sized,
{
    let candidates = resolver.candidates(
        MediaKind::Photos.search_path(),
        &query::simple_query_string(query, count),
    );
    let outcome = match failover::fetch_first::<SearchResponse, R>(transport, &candidates, headers) {
        FailoverOutcome::Success { data, .. } => {
            let mut items = data.into_items(MediaKind::Photos);
            items.truncate(count as usize);
            if items.is_empty() {
                RelatedOutcome::Empty
            } else {
                RelatedOutcome::Items(items)
            }
        }
        FailoverOutcome::Exhausted { .. } => RelatedOutcome::Failed,
    };
    RelatedStrip {
        query: query.to_string(),
        outcome,
    }
}
