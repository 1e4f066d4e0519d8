//! Rendering adapter: everything the session shows goes through here.
//!
//! The session only ever hands over view models (cards, detail, saved list).
//! Implementations decide how to draw them; the CLI prints to a terminal.

use crate::detail::{DetailView, RelatedStrip};
use crate::render::Card;
use crate::saved::SavedItem;
use crate::theme::Theme;

pub trait Surface {
    /// Loading indicator on/off.
    fn set_loading(&mut self, active: bool);
    /// Transient status or error message.
    fn notice(&mut self, message: &str);
    /// Gallery heading.
    fn set_title(&mut self, title: &str);
    /// Displayed results were cleared by a reset.
    fn clear_feed(&mut self);
    /// Cards appended to the feed; `first_index` is the feed position of `cards[0]`.
    fn append_cards(&mut self, first_index: usize, cards: &[Card]);
    /// One card changed (e.g. its save toggle).
    fn update_card(&mut self, index: usize, card: &Card);
    fn show_detail(&mut self, detail: &DetailView);
    fn show_related(&mut self, related: &RelatedStrip);
    fn close_detail(&mut self);
    /// Saved-items count badge.
    fn saved_count(&mut self, count: usize);
    fn show_saved_panel(&mut self, items: &[SavedItem]);
    fn close_saved_panel(&mut self);
    fn apply_theme(&mut self, theme: Theme);
    /// Hand a URL to something outside the app (browser, opener).
    fn open_external(&mut self, url: &str);
}
