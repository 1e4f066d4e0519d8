//! Surface that keeps what it was shown, for assertions.

use pixelpro_core::detail::{DetailView, RelatedStrip};
use pixelpro_core::render::Card;
use pixelpro_core::saved::SavedItem;
use pixelpro_core::surface::Surface;
use pixelpro_core::theme::Theme;

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub cards: Vec<Card>,
    pub notices: Vec<String>,
    pub loading: bool,
    pub saved_count: usize,
    pub theme: Option<Theme>,
    pub opened_external: Vec<String>,
    pub detail_ids: Vec<u64>,
}

impl Surface for RecordingSurface {
    fn set_loading(&mut self, active: bool) {
        self.loading = active;
    }
    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
    fn set_title(&mut self, _title: &str) {}
    fn clear_feed(&mut self) {
        self.cards.clear();
    }
    fn append_cards(&mut self, first_index: usize, cards: &[Card]) {
        assert_eq!(first_index, self.cards.len(), "cards must be appended in order");
        self.cards.extend_from_slice(cards);
    }
    fn update_card(&mut self, index: usize, card: &Card) {
        self.cards[index] = card.clone();
    }
    fn show_detail(&mut self, detail: &DetailView) {
        self.detail_ids.push(detail.item.id);
    }
    fn show_related(&mut self, _related: &RelatedStrip) {}
    fn close_detail(&mut self) {}
    fn saved_count(&mut self, count: usize) {
        self.saved_count = count;
    }
    fn show_saved_panel(&mut self, _items: &[SavedItem]) {}
    fn close_saved_panel(&mut self) {}
    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
    fn open_external(&mut self, url: &str) {
        self.opened_external.push(url.to_string());
    }
}
