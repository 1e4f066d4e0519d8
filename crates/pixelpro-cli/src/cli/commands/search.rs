//! `pixelpro search` – one-shot search printed as cards.

use anyhow::Result;
use pixelpro_core::config::PixelProConfig;
use pixelpro_core::fetcher::{ContentFetcher, FetchResult};
use pixelpro_core::http::CurlTransport;
use pixelpro_core::local_store::FileStore;
use pixelpro_core::query::{MediaKind, Orientation, QueryState};
use pixelpro_core::saved::SavedStore;
use pixelpro_core::surface::Surface;

use crate::cli::terminal::TerminalSurface;

#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub query: String,
    pub kind: MediaKind,
    pub orientation: Option<Orientation>,
    pub color: Option<String>,
    pub pages: u32,
}

impl SearchArgs {
    pub fn to_query_state(&self) -> QueryState {
        let mut q = QueryState::new(self.query.trim());
        q.kind = self.kind;
        q.orientation = self.orientation;
        q.color = self.color.clone().filter(|c| !c.trim().is_empty());
        q
    }
}

pub fn run_search(cfg: &PixelProConfig, args: &SearchArgs) -> Result<()> {
    if args.query.trim().is_empty() {
        anyhow::bail!("search term must not be empty");
    }
    let transport = CurlTransport::new(&cfg.http);
    let saved = SavedStore::load(FileStore::open_default()?);
    let mut fetcher = ContentFetcher::from_config(cfg, args.to_query_state());
    let mut surface = TerminalSurface::stdout();

    surface.set_title(&format!("Results for \"{}\"", args.query.trim()));
    let mut result = fetcher.fetch(&transport, true, &saved, &mut surface);
    for _ in 1..args.pages.max(1) {
        if !matches!(result, FetchResult::Appended { .. }) {
            break;
        }
        result = fetcher.load_more(&transport, &saved, &mut surface);
    }

    tracing::info!(query = %args.query, shown = fetcher.feed().len(), "search finished");
    if result == FetchResult::Exhausted {
        anyhow::bail!("no candidate endpoint answered");
    }
    Ok(())
}
