//! Test doubles: scripted transport, recording surface, sample items.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::detail::{DetailView, RelatedStrip};
use crate::http::{HttpResponse, Request, Transport};
use crate::local_store::{KeyValueStore, MemoryStore};
use crate::media::{MediaItem, PhotoSources};
use crate::render::Card;
use crate::saved::SavedItem;
use crate::surface::Surface;
use crate::theme::Theme;

const CURLE_COULDNT_CONNECT: u32 = 7;
const CURLE_OPERATION_TIMEDOUT: u32 = 28;

/// Scripted reply for one URL.
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Refused,
    TimedOut,
    Status(u32, String),
    Bytes(u32, Vec<u8>),
}

/// Transport answering from a per-URL script. The last scripted reply for a
/// URL repeats; unscripted URLs are refused.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    scripts: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<String>>,
    headers: RefCell<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(&self, url: &str, reply: Scripted) {
        self.scripts
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn script_bytes(&self, url: &str, status: u32, body: Vec<u8>) {
        self.script(url, Scripted::Bytes(status, body));
    }

    /// URLs requested so far, in order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_headers(&self) -> Vec<(String, String)> {
        self.headers.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, request: &Request<'_>) -> Result<HttpResponse, curl::Error> {
        self.requests.borrow_mut().push(request.url.to_string());
        *self.headers.borrow_mut() = request.headers.to_vec();
        let reply = {
            let mut scripts = self.scripts.borrow_mut();
            match scripts.get_mut(request.url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        match reply.unwrap_or(Scripted::Refused) {
            Scripted::Refused => Err(curl::Error::new(CURLE_COULDNT_CONNECT)),
            Scripted::TimedOut => Err(curl::Error::new(CURLE_OPERATION_TIMEDOUT)),
            Scripted::Status(status, body) => Ok(HttpResponse {
                status,
                body: body.into_bytes(),
            }),
            Scripted::Bytes(status, body) => Ok(HttpResponse { status, body }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceEvent {
    Loading(bool),
    Notice(String),
    Title(String),
    ClearFeed,
    Append { first_index: usize, ids: Vec<u64> },
    UpdateCard { index: usize, saved: bool },
    ShowDetail { id: u64, tags: Vec<String> },
    ShowRelated(RelatedStrip),
    CloseDetail,
    SavedCount(usize),
    SavedPanel(Vec<u64>),
    ClosePanel,
    Theme(Theme),
    OpenExternal(String),
}

/// Surface that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub(crate) fn appended_ids(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Append { ids, .. } => Some(ids.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub(crate) fn notices(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, pred: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub(crate) fn last_saved_count(&self) -> Option<usize> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::SavedCount(n) => Some(*n),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn set_loading(&mut self, active: bool) {
        self.events.push(SurfaceEvent::Loading(active));
    }
    fn notice(&mut self, message: &str) {
        self.events.push(SurfaceEvent::Notice(message.to_string()));
    }
    fn set_title(&mut self, title: &str) {
        self.events.push(SurfaceEvent::Title(title.to_string()));
    }
    fn clear_feed(&mut self) {
        self.events.push(SurfaceEvent::ClearFeed);
    }
    fn append_cards(&mut self, first_index: usize, cards: &[Card]) {
        self.events.push(SurfaceEvent::Append {
            first_index,
            ids: cards.iter().map(|c| c.id).collect(),
        });
    }
    fn update_card(&mut self, index: usize, card: &Card) {
        self.events.push(SurfaceEvent::UpdateCard {
            index,
            saved: card.saved,
        });
    }
    fn show_detail(&mut self, detail: &DetailView) {
        self.events.push(SurfaceEvent::ShowDetail {
            id: detail.item.id,
            tags: detail.tags.clone(),
        });
    }
    fn show_related(&mut self, related: &RelatedStrip) {
        self.events.push(SurfaceEvent::ShowRelated(related.clone()));
    }
    fn close_detail(&mut self) {
        self.events.push(SurfaceEvent::CloseDetail);
    }
    fn saved_count(&mut self, count: usize) {
        self.events.push(SurfaceEvent::SavedCount(count));
    }
    fn show_saved_panel(&mut self, items: &[SavedItem]) {
        self.events
            .push(SurfaceEvent::SavedPanel(items.iter().map(|s| s.id).collect()));
    }
    fn close_saved_panel(&mut self) {
        self.events.push(SurfaceEvent::ClosePanel);
    }
    fn apply_theme(&mut self, theme: Theme) {
        self.events.push(SurfaceEvent::Theme(theme));
    }
    fn open_external(&mut self, url: &str) {
        self.events.push(SurfaceEvent::OpenExternal(url.to_string()));
    }
}

/// Store whose reads and writes all fail, like an unwritable state dir.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("local store unavailable")
    }

    fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("no space left on device")
    }
}

pub(crate) fn memory_store() -> MemoryStore {
    MemoryStore::new()
}

fn image_url(id: u64, size: &str) -> String {
    format!("https://images.example.com/{id}/{size}.jpeg")
}

/// Photo item with predictable URLs under `https://images.example.com/<id>/`.
pub(crate) fn photo(id: u64, alt: Option<&str>) -> MediaItem {
    MediaItem {
        id,
        alt: alt.map(str::to_string),
        avg_color: Some("#7A6E5D".to_string()),
        photographer: Some(format!("Photographer {id}")),
        src: Some(PhotoSources {
            original: Some(image_url(id, "original")),
            large2x: Some(image_url(id, "large2x")),
            large: Some(image_url(id, "large")),
            medium: Some(image_url(id, "medium")),
            ..PhotoSources::default()
        }),
        ..MediaItem::default()
    }
}

/// Photo search body for items built with [`photo`].
pub(crate) fn photos_body(items: &[MediaItem]) -> String {
    let photos: Vec<serde_json::Value> = items
        .iter()
        .map(|i| {
            serde_json::json!({
                "id": i.id,
                "alt": i.alt,
                "avg_color": i.avg_color,
                "photographer": i.photographer,
                "src": {
                    "original": image_url(i.id, "original"),
                    "large2x": image_url(i.id, "large2x"),
                    "large": image_url(i.id, "large"),
                    "medium": image_url(i.id, "medium"),
                }
            })
        })
        .collect();
    serde_json::json!({ "page": 1, "per_page": items.len(), "photos": photos }).to_string()
}
