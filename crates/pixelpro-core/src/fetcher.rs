//! Paginated content fetching.
//!
//! A fetch cycle is split in two phases so the network step can run anywhere:
//! [`ContentFetcher::begin`] applies the reset, raises the loading flag and
//! hands out a [`FetchTicket`]; [`ContentFetcher::complete`] applies the
//! failover outcome. Every ticket carries the generation it was issued in. A
//! reset bumps the generation, so a response for an older query is dropped
//! instead of landing in the new feed.

use crate::config::PixelProConfig;
use crate::failover::{self, FailoverOutcome};
use crate::http::Transport;
use crate::media::SearchResponse;
use crate::proxy::{Origin, ProxyResolver};
use crate::query::{MediaKind, QueryState};
use crate::render::Feed;
use crate::saved::SavedStore;
use crate::surface::Surface;

/// Notice shown when every candidate failed.
pub const EXHAUSTED_NOTICE: &str = "Could not load content. Check your connection.";

/// `Authorization` header for the API, if a key is configured.
pub fn auth_headers(api_key: Option<&str>) -> Vec<(String, String)> {
    api_key
        .map(|k| vec![("Authorization".to_string(), k.to_string())])
        .unwrap_or_default()
}

/// One in-flight fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub kind: MediaKind,
    pub page: u32,
    pub candidates: Vec<String>,
}

/// What a fetch cycle did to the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchResult {
    /// Another fetch was in flight (or nothing more to load); nothing happened.
    Skipped,
    /// Cards appended starting at `first_index`.
    Appended { first_index: usize, count: usize },
    /// Successful empty page: no more content.
    EndOfContent,
    /// All candidates failed; state left as it was.
    Exhausted,
    /// Response belonged to a superseded generation and was dropped.
    Stale,
}

/// Owns the query state and the displayed feed.
#[derive(Debug)]
pub struct ContentFetcher {
    resolver: ProxyResolver,
    headers: Vec<(String, String)>,
    per_page: u32,
    query: QueryState,
    feed: Feed,
    generation: u64,
}

impl ContentFetcher {
    pub fn new(
        resolver: ProxyResolver,
        headers: Vec<(String, String)>,
        per_page: u32,
        query: QueryState,
    ) -> Self {
        Self {
            resolver,
            headers,
            per_page: per_page.max(1),
            query,
            feed: Feed::new(),
            generation: 0,
        }
    }

    /// Fetcher wired from configuration: resolver for the configured origin,
    /// auth header from the resolved API key.
    pub fn from_config(config: &PixelProConfig, query: QueryState) -> Self {
        let origin = Origin::parse(&config.origin);
        let api_key = config.resolved_api_key();
        if api_key.is_none() {
            tracing::warn!("no API key configured; requests will likely be rejected");
        }
        let resolver = ProxyResolver::new(&config.base_url, origin, config.relays.clone());
        Self::new(resolver, auth_headers(api_key.as_deref()), config.per_page, query)
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Mutable query state, for search/tab/filter changes before a reset fetch.
    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolver(&self) -> &ProxyResolver {
        &self.resolver
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Start a cycle. Returns None for a non-reset call while one is loading.
    ///
    /// A reset always starts a new generation, superseding whatever is in flight.
    pub fn begin(&mut self, reset: bool, surface: &mut dyn Surface) -> Option<FetchTicket> {
        if self.query.loading && !reset {
            tracing::debug!("fetch skipped: already loading");
            return None;
        }
        if reset {
            self.generation += 1;
            self.query.reset_pagination();
            self.feed.clear();
            surface.clear_feed();
        }
        self.query.loading = true;
        surface.set_loading(true);

        let candidates = self.resolver.candidates(
            self.query.kind.search_path(),
            &self.query.to_query_string(self.per_page),
        );
        tracing::debug!(
            generation = self.generation,
            page = self.query.page,
            kind = %self.query.kind,
            query = %self.query.query,
            "fetch cycle started with {} candidate(s)",
            candidates.len()
        );
        Some(FetchTicket {
            generation: self.generation,
            kind: self.query.kind,
            page: self.query.page,
            candidates,
        })
    }

    /// Apply the outcome of a cycle started by [`begin`](Self::begin).
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: FailoverOutcome<SearchResponse>,
        saved: &SavedStore,
        surface: &mut dyn Surface,
    ) -> FetchResult {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping response from superseded fetch"
            );
            return FetchResult::Stale;
        }

        let result = match outcome {
            FailoverOutcome::Success { data, .. } => {
                let items = data.into_items(ticket.kind);
                if items.is_empty() {
                    tracing::info!(page = ticket.page, "end of content");
                    self.query.has_more = false;
                    FetchResult::EndOfContent
                } else {
                    let count = items.len();
                    let first_index = self.feed.append(items, ticket.kind, saved);
                    let cards: Vec<_> = self.feed.cards().skip(first_index).cloned().collect();
                    surface.append_cards(first_index, &cards);
                    self.query.page += 1;
                    FetchResult::Appended { first_index, count }
                }
            }
            FailoverOutcome::Exhausted { failures } => {
                tracing::warn!(page = ticket.page, "fetch exhausted {} candidate(s)", failures.len());
                surface.notice(EXHAUSTED_NOTICE);
                FetchResult::Exhausted
            }
        };

        self.query.loading = false;
        surface.set_loading(false);
        result
    }

    /// Full cycle over `transport`.
    pub fn fetch<R>(
        &mut self,
        transport: &R,
        reset: bool,
        saved: &SavedStore,
        surface: &mut dyn Surface,
    ) -> FetchResult
    where
        R: Transport + ?Sized,
    {
        let Some(ticket) = self.begin(reset, surface) else {
            return FetchResult::Skipped;
        };
        let outcome = failover::fetch_first::<SearchResponse, R>(transport, &ticket.candidates, &self.headers);
        self.complete(ticket, outcome, saved, surface)
    }

    /// Scroll trigger: next page only while more is available and nothing is loading.
    pub fn load_more<R>(&mut self, transport: &R, saved: &SavedStore, surface: &mut dyn Surface) -> FetchResult
    where
        R: Transport + ?Sized,
    {
        if !self.query.has_more || self.query.loading {
            return FetchResult::Skipped;
        }
        self.fetch(transport, false, saved, surface)
    }
}
