//! Media items as returned by the search API.
//!
//! Every field is optional on the wire; accessors mask missing values with
//! fallbacks instead of failing the whole response.

use serde::Deserialize;

use crate::query::MediaKind;

/// Shown when neither `user.name` nor `photographer` is present.
pub const UNKNOWN_CREATOR: &str = "Unknown creator";

/// Image renditions of a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhotoSources {
    pub original: Option<String>,
    pub large2x: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub tiny: Option<String>,
}

/// Creator of a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaUser {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// One encoded rendition of a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VideoFile {
    pub link: Option<String>,
    pub quality: Option<String>,
    pub file_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl VideoFile {
    fn pixels(&self) -> Option<u64> {
        Some(u64::from(self.width?) * u64::from(self.height?))
    }
}

/// One search result (photo or video).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    pub id: u64,
    pub alt: Option<String>,
    pub avg_color: Option<String>,
    pub photographer: Option<String>,
    pub user: Option<MediaUser>,
    pub src: Option<PhotoSources>,
    /// Preview image of a video.
    pub image: Option<String>,
    pub video_files: Vec<VideoFile>,
}

impl MediaItem {
    /// Video creator name, else photographer, else a fixed fallback.
    pub fn creator_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .or(self.photographer.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_CREATOR)
    }

    /// Descriptive text, if any non-blank text is present.
    pub fn description(&self) -> Option<&str> {
        self.alt.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Grid thumbnail.
    pub fn thumbnail_url(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Photos => self.src.as_ref().and_then(|s| {
                s.large
                    .as_deref()
                    .or(s.medium.as_deref())
                    .or(s.original.as_deref())
            }),
            MediaKind::Videos => self.image.as_deref(),
        }
    }

    /// Small thumbnail used in the related-items strip.
    pub fn small_thumbnail_url(&self) -> Option<&str> {
        self.src
            .as_ref()
            .and_then(|s| s.medium.as_deref().or(s.small.as_deref()))
            .or(self.image.as_deref())
    }

    /// Enlarged preview for the detail view.
    pub fn preview_url(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Photos => self.src.as_ref().and_then(|s| {
                s.large2x
                    .as_deref()
                    .or(s.large.as_deref())
                    .or(s.original.as_deref())
            }),
            MediaKind::Videos => self.best_video_link(),
        }
    }

    /// Original / highest-quality rendition, independent of what is displayed.
    pub fn download_url(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Photos => self.src.as_ref().and_then(|s| {
                s.original
                    .as_deref()
                    .or(s.large2x.as_deref())
                    .or(s.large.as_deref())
            }),
            MediaKind::Videos => self.best_video_link(),
        }
    }

    /// Rendition with the largest frame; the first one when no dimensions are known.
    fn best_video_link(&self) -> Option<&str> {
        let with_link = || self.video_files.iter().filter(|f| f.link.is_some());
        with_link()
            .filter(|f| f.pixels().is_some())
            .max_by_key(|f| f.pixels())
            .or_else(|| with_link().next())
            .and_then(|f| f.link.as_deref())
    }
}

/// Search response body. Photos and videos arrive under different keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_results: Option<u64>,
    pub next_page: Option<String>,
    pub photos: Option<Vec<MediaItem>>,
    pub videos: Option<Vec<MediaItem>>,
}

impl SearchResponse {
    /// Result list for `kind`; a missing list is empty.
    pub fn into_items(self, kind: MediaKind) -> Vec<MediaItem> {
        match kind {
            MediaKind::Photos => self.photos,
            MediaKind::Videos => self.videos,
        }
        .unwrap_or_default()
    }
}
