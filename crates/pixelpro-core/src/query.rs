//! Query state: what the gallery is currently showing and how to ask for more.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First value of the pagination counter.
pub const FIRST_PAGE: u32 = 1;

/// Kind of media the gallery is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Photos,
    Videos,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Photos => "photos",
            MediaKind::Videos => "videos",
        }
    }

    /// API search path for this kind.
    pub fn search_path(self) -> &'static str {
        match self {
            MediaKind::Photos => "/v1/search",
            MediaKind::Videos => "/videos/search",
        }
    }

    /// Extension used for downloaded files.
    pub fn file_extension(self) -> &'static str {
        match self {
            MediaKind::Photos => "jpeg",
            MediaKind::Videos => "mp4",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" | "photos" => Ok(MediaKind::Photos),
            "video" | "videos" => Ok(MediaKind::Videos),
            other => anyhow::bail!("unknown media kind: {other}"),
        }
    }
}

/// Orientation filter accepted by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        }
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            "square" => Ok(Orientation::Square),
            other => anyhow::bail!("unknown orientation: {other}"),
        }
    }
}

/// The current search/filter/pagination configuration.
///
/// Owned by the session and mutated in place by every user action that
/// changes what is displayed. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub query: String,
    pub kind: MediaKind,
    pub orientation: Option<Orientation>,
    pub color: Option<String>,
    pub loading: bool,
    pub has_more: bool,
}

impl QueryState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            page: FIRST_PAGE,
            query: query.into(),
            kind: MediaKind::default(),
            orientation: None,
            color: None,
            loading: false,
            has_more: true,
        }
    }

    /// Back to the first page with more content assumed available.
    pub fn reset_pagination(&mut self) {
        self.page = FIRST_PAGE;
        self.has_more = true;
    }

    /// Encoded query string for the current page.
    pub fn to_query_string(&self, per_page: u32) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        ser.append_pair("query", &self.query)
            .append_pair("page", &self.page.to_string())
            .append_pair("per_page", &per_page.to_string());
        if let Some(o) = self.orientation {
            ser.append_pair("orientation", o.as_str());
        }
        if let Some(c) = self.color.as_deref().filter(|c| !c.is_empty()) {
            ser.append_pair("color", c);
        }
        ser.finish()
    }
}

/// Query string for a one-off photo search (no paging state, no filters).
pub fn simple_query_string(query: &str, per_page: u32) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("query", query)
        .append_pair("per_page", &per_page.to_string())
        .finish()
}
