//! Plain-text rendering of the gallery for a terminal.
//!
//! Card numbers shown to the user are 1-based feed positions; the same
//! numbers are accepted back by the browse commands.

use pixelpro_core::detail::{DetailView, RelatedStrip};
use pixelpro_core::render::Card;
use pixelpro_core::saved::SavedItem;
use pixelpro_core::surface::Surface;
use pixelpro_core::theme::Theme;
use std::io::Write;

/// Program used to open URLs outside the terminal.
const OPENER: &str = "xdg-open";

pub struct TerminalSurface<W: Write> {
    out: W,
    opener: Option<&'static str>,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            opener: Some(OPENER),
        }
    }

    /// Print URLs instead of launching an opener.
    #[cfg(test)]
    pub fn without_opener(mut self) -> Self {
        self.opener = None;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Output errors (closed pipe) are not worth aborting a session for.
        let _ = writeln!(self.out, "{}", text);
    }
}

/// One-line rendering of a card at feed position `index`.
pub fn format_card(index: usize, card: &Card) -> String {
    let marker = if card.saved { "♥" } else { " " };
    let kind = if card.is_video() { " [video]" } else { "" };
    format!(
        "{:>3}. {} #{:<10} {}{} by {} ({})",
        index + 1,
        marker,
        card.id,
        card.alt,
        kind,
        card.creator,
        card.accent
    )
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_loading(&mut self, active: bool) {
        if active {
            self.line("Loading...");
        }
    }

    fn notice(&mut self, message: &str) {
        self.line(&format!("* {}", message));
    }

    fn set_title(&mut self, title: &str) {
        self.line(&format!("== {} ==", title));
    }

    fn clear_feed(&mut self) {
        self.line("");
    }

    fn append_cards(&mut self, first_index: usize, cards: &[Card]) {
        for (offset, card) in cards.iter().enumerate() {
            self.line(&format_card(first_index + offset, card));
        }
    }

    fn update_card(&mut self, index: usize, card: &Card) {
        self.line(&format_card(index, card));
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.line(&format!("--- {} ---", detail.title));
        self.line(&format!("{}: {}", detail.creator_label, detail.creator));
        self.line(&detail.description);
        if let Some(url) = &detail.preview_url {
            self.line(&format!("Preview: {}", url));
        }
        let tags: Vec<String> = detail
            .tags
            .iter()
            .enumerate()
            .map(|(i, t)| format!("[{}] {}", i + 1, t))
            .collect();
        self.line(&format!("Tags: {}", tags.join("  ")));
    }

    fn show_related(&mut self, related: &RelatedStrip) {
        if let Some(message) = related.message() {
            self.line(&format!("Related: {}", message));
            return;
        }
        self.line("Related:");
        for (i, url) in related.thumbnails().iter().enumerate() {
            self.line(&format!("  r{}. {}", i + 1, url));
        }
    }

    fn close_detail(&mut self) {
        self.line("(detail closed)");
    }

    fn saved_count(&mut self, count: usize) {
        self.line(&format!("Saved: {}", count));
    }

    fn show_saved_panel(&mut self, items: &[SavedItem]) {
        if items.is_empty() {
            self.line("No saved items yet.");
            return;
        }
        for item in items {
            self.line(&format_saved(item));
        }
    }

    fn close_saved_panel(&mut self) {}

    fn apply_theme(&mut self, theme: Theme) {
        self.line(&format!("Theme: {}", theme.as_str()));
    }

    fn open_external(&mut self, url: &str) {
        match self.opener {
            Some(program) => {
                if let Err(e) = std::process::Command::new(program).arg(url).spawn() {
                    tracing::warn!(%url, "could not launch {}: {}", program, e);
                    self.line(&format!("Open manually: {}", url));
                }
            }
            None => self.line(&format!("Open: {}", url)),
        }
    }
}

/// One-line rendering of a saved item.
pub fn format_saved(item: &SavedItem) -> String {
    format!("#{:<10} {:<6} {} {}", item.id, item.kind.as_str(), item.creator, item.img)
}
