//! Gallery session: the context object that owns all mutable state.
//!
//! Query state, feed, saved items, theme, and the open detail view live here
//! instead of in process-wide globals. `open` loads persisted state and
//! applies it to the surface; `close` tears the session down.

use std::path::PathBuf;

use crate::config::PixelProConfig;
use crate::detail::{self, DetailView, RelatedStrip};
use crate::download::{self, DownloadOutcome};
use crate::fetcher::{ContentFetcher, FetchResult};
use crate::http::Transport;
use crate::local_store::KeyValueStore;
use crate::media::MediaItem;
use crate::query::{MediaKind, Orientation, QueryState};
use crate::render::Feed;
use crate::saved::{SavedStore, Toggled};
use crate::surface::Surface;
use crate::theme::{self, Theme};

/// Notice shown when saved items or the theme could not be written.
pub const STORE_WRITE_NOTICE: &str = "Could not save your changes.";

struct OpenDetail {
    view: DetailView,
    related: RelatedStrip,
}

pub struct Session<T: Transport, S: Surface> {
    config: PixelProConfig,
    transport: T,
    surface: S,
    fetcher: ContentFetcher,
    saved: SavedStore,
    prefs: Box<dyn KeyValueStore>,
    theme: Theme,
    detail: Option<OpenDetail>,
    saved_panel_open: bool,
}

impl<T: Transport, S: Surface> Session<T, S> {
    /// Load saved items and theme from `store`, apply them to `surface`.
    pub fn open<K>(config: PixelProConfig, transport: T, store: K, mut surface: S) -> Self
    where
        K: KeyValueStore + Clone + 'static,
    {
        let saved = SavedStore::load(store.clone());
        let theme = theme::load_or_default(&store);

        let fetcher =
            ContentFetcher::from_config(&config, QueryState::new(config.default_query.clone()));

        surface.apply_theme(theme);
        surface.saved_count(saved.len());
        surface.set_title(kind_title(MediaKind::default()));
        tracing::info!(origin = ?fetcher.resolver().origin(), saved = saved.len(), theme = theme.as_str(), "session opened");

        Self {
            config,
            transport,
            surface,
            fetcher,
            saved,
            prefs: Box::new(store),
            theme,
            detail: None,
            saved_panel_open: false,
        }
    }

    /// Initial load of the default query.
    pub fn start(&mut self) -> FetchResult {
        self.fetch(true)
    }

    /// Tear down; returns the surface.
    pub fn close(self) -> S {
        let q = self.fetcher.query();
        tracing::info!(
            query = %q.query,
            kind = %q.kind,
            shown = self.fetcher.feed().len(),
            saved = self.saved.len(),
            "session closed"
        );
        self.surface
    }

    pub fn query(&self) -> &QueryState {
        self.fetcher.query()
    }

    pub fn feed(&self) -> &Feed {
        self.fetcher.feed()
    }

    pub fn saved(&self) -> &SavedStore {
        &self.saved
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref().map(|d| &d.view)
    }

    pub fn related(&self) -> Option<&RelatedStrip> {
        self.detail.as_ref().map(|d| &d.related)
    }

    pub fn is_saved_panel_open(&self) -> bool {
        self.saved_panel_open
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn fetch(&mut self, reset: bool) -> FetchResult {
        self.fetcher
            .fetch(&self.transport, reset, &self.saved, &mut self.surface)
    }

    // --- query changes -------------------------------------------------

    /// New top-level search. Blank terms are ignored.
    pub fn search(&mut self, term: &str) -> FetchResult {
        let term = term.trim();
        if term.is_empty() {
            return FetchResult::Skipped;
        }
        self.fetcher.query_mut().query = term.to_string();
        self.surface.set_title(&format!("Results for \"{}\"", term));
        self.fetch(true)
    }

    /// Switch between photos and videos.
    pub fn switch_kind(&mut self, kind: MediaKind) -> FetchResult {
        self.fetcher.query_mut().kind = kind;
        self.surface.set_title(kind_title(kind));
        self.fetch(true)
    }

    pub fn set_orientation(&mut self, orientation: Option<Orientation>) -> FetchResult {
        self.fetcher.query_mut().orientation = orientation;
        self.fetch(true)
    }

    pub fn set_color(&mut self, color: Option<String>) -> FetchResult {
        self.fetcher.query_mut().color = color.filter(|c| !c.trim().is_empty());
        self.fetch(true)
    }

    /// Infinite-scroll trigger.
    pub fn load_more(&mut self) -> FetchResult {
        self.fetcher
            .load_more(&self.transport, &self.saved, &mut self.surface)
    }

    // --- cards -----------------------------------------------------------

    /// Open the detail view for the card at `index`. False if there is no such card.
    pub fn open_card(&mut self, index: usize) -> bool {
        let Some(entry) = self.fetcher.feed().get(index) else {
            return false;
        };
        let item = entry.item.clone();
        let kind = entry.card.kind;
        self.open_item(item, kind);
        true
    }

    /// Toggle save for the card at `index`, reading saved state fresh and
    /// refreshing only that card. None for an unknown index or a failed write.
    pub fn toggle_save_card(&mut self, index: usize) -> Option<Toggled> {
        let card = self.fetcher.feed().get(index)?.card.clone();
        let toggled = match self
            .saved
            .toggle(card.id, &card.thumbnail, card.kind, &card.creator)
        {
            Ok(t) => t,
            Err(e) => {
                self.write_failed(&e);
                return None;
            }
        };
        self.surface.notice(match toggled {
            Toggled::Added => "Item Saved!",
            Toggled::Removed => "Removed from Saved",
        });
        if let Some(card) = self.fetcher.feed_mut().refresh_saved(index, &self.saved) {
            self.surface.update_card(index, card);
        }
        self.after_saved_change();
        Some(toggled)
    }

    /// Download the original rendition of the card at `index`.
    pub fn download_card(&mut self, index: usize) -> Option<DownloadOutcome> {
        let card = self.fetcher.feed().get(index)?.card.clone();
        self.download(card.download_url.as_deref(), &card.download_filename())
    }

    // --- detail view ---------------------------------------------------

    fn open_item(&mut self, item: MediaItem, kind: MediaKind) {
        let view = DetailView::new(item, kind, &self.fetcher.query().query);
        tracing::debug!(id = view.item.id, tags = ?view.tags, "detail opened");
        self.surface.show_detail(&view);

        let pending = RelatedStrip::pending(&view.related_query);
        self.surface.show_related(&pending);
        let related = detail::fetch_related(
            &self.transport,
            self.fetcher.resolver(),
            self.fetcher.headers(),
            &view.related_query,
            self.config.related_count,
        );
        self.surface.show_related(&related);
        self.detail = Some(OpenDetail { view, related });
    }

    pub fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.surface.close_detail();
        }
    }

    /// Close the detail view and search for tag `index`.
    pub fn select_tag(&mut self, index: usize) -> FetchResult {
        let Some(tag) = self
            .detail
            .as_ref()
            .and_then(|d| d.view.tags.get(index).cloned())
        else {
            return FetchResult::Skipped;
        };
        self.close_detail();
        self.search(&tag)
    }

    /// Replace the detail subject with related item `index`. False if there is none.
    pub fn select_related(&mut self, index: usize) -> bool {
        let Some(item) = self
            .detail
            .as_ref()
            .and_then(|d| d.related.get(index).cloned())
        else {
            return false;
        };
        // Related items always come from the photo search.
        self.open_item(item, MediaKind::Photos);
        true
    }

    pub fn download_detail(&mut self) -> Option<DownloadOutcome> {
        let (url, name) = self
            .detail
            .as_ref()
            .map(|d| (d.view.download_url.clone(), d.view.download_filename()))?;
        self.download(url.as_deref(), &name)
    }

    // --- saved items ---------------------------------------------------

    pub fn open_saved_panel(&mut self) {
        self.saved_panel_open = true;
        self.surface.show_saved_panel(self.saved.items());
    }

    pub fn close_saved_panel(&mut self) {
        if self.saved_panel_open {
            self.saved_panel_open = false;
            self.surface.close_saved_panel();
        }
    }

    /// Remove `id` from saved items; absent ids are a no-op. Returns whether it was removed.
    pub fn remove_saved(&mut self, id: u64) -> bool {
        match self.saved.remove(id) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                self.write_failed(&e);
                return false;
            }
        }
        self.surface.notice("Removed");
        self.refresh_cards_for(id);
        self.after_saved_change();
        true
    }

    /// Remove every saved item.
    pub fn clear_saved(&mut self) {
        let ids: Vec<u64> = self.saved.items().iter().map(|s| s.id).collect();
        if let Err(e) = self.saved.clear() {
            self.write_failed(&e);
            return;
        }
        for id in ids {
            self.refresh_cards_for(id);
        }
        self.after_saved_change();
    }

    /// State is unchanged after a failed write; tell the user and carry on.
    fn write_failed(&mut self, error: &anyhow::Error) {
        tracing::warn!("local store write failed: {:#}", error);
        self.surface.notice(STORE_WRITE_NOTICE);
    }

    fn refresh_cards_for(&mut self, id: u64) {
        for index in self.fetcher.feed_mut().refresh_saved_id(id, &self.saved) {
            if let Some(entry) = self.fetcher.feed().get(index) {
                self.surface.update_card(index, &entry.card);
            }
        }
    }

    /// Badge always; panel only while it is open.
    fn after_saved_change(&mut self) {
        self.surface.saved_count(self.saved.len());
        if self.saved_panel_open {
            self.surface.show_saved_panel(self.saved.items());
        }
    }

    // --- theme & downloads ---------------------------------------------

    /// Flip and persist the theme. Returns the theme now in effect, which is
    /// the old one if it could not be saved.
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        if let Err(e) = theme::save(self.prefs.as_mut(), next) {
            self.write_failed(&e);
            return self.theme;
        }
        self.surface.apply_theme(next);
        self.theme = next;
        next
    }

    fn download_dir(&self) -> PathBuf {
        self.config
            .download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// None when the item has no downloadable rendition.
    fn download(&mut self, url: Option<&str>, filename: &str) -> Option<DownloadOutcome> {
        let Some(url) = url else {
            self.surface.notice("Nothing to download for this item.");
            return None;
        };
        self.surface.notice("Downloading...");
        let outcome = download::download(
            &self.transport,
            url,
            &self.download_dir(),
            filename,
            self.config.http.download_timeout(),
        );
        match &outcome {
            DownloadOutcome::Saved(_) => self.surface.notice("Download Complete!"),
            DownloadOutcome::OpenExternally(url) => {
                self.surface.open_external(url);
                self.surface.notice("Opened in New Tab");
            }
        }
        Some(outcome)
    }
}

fn kind_title(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Photos => "Explore Photos",
        MediaKind::Videos => "Explore Videos",
    }
}

#[cfg(test)]
mod tests;
