use super::*;
use crate::detail::RelatedOutcome;
use crate::local_store::{MemoryStore, SAVED_KEY, THEME_KEY};
use crate::local_store::FileStore;
use crate::testing::{photo, photos_body, FailingStore, RecordingSurface, Scripted, ScriptedTransport, SurfaceEvent};

const BASE: &str = "https://api.test";

fn config() -> PixelProConfig {
    PixelProConfig {
        base_url: BASE.to_string(),
        api_key: Some("key".to_string()),
        origin: "http://localhost".to_string(),
        ..PixelProConfig::default()
    }
}

fn page_url(query: &str, page: u32) -> String {
    format!("{BASE}/v1/search?query={query}&page={page}&per_page=15")
}

fn related_url(query: &str) -> String {
    format!("{BASE}/v1/search?query={query}&per_page=6")
}

fn fifteen() -> String {
    let items: Vec<_> = (1..=15)
        .map(|i| photo(i, Some("Sunset over the Himalayas, India")))
        .collect();
    photos_body(&items)
}

fn open_session(t: ScriptedTransport, store: MemoryStore) -> Session<ScriptedTransport, RecordingSurface> {
    Session::open(config(), t, store, RecordingSurface::default())
}

fn started(store: MemoryStore) -> Session<ScriptedTransport, RecordingSurface> {
    let t = ScriptedTransport::new();
    t.script(&page_url("India", 1), Scripted::Status(200, fifteen()));
    let mut s = open_session(t, store);
    s.start();
    s
}

#[test]
fn open_applies_persisted_theme_and_badge() {
    let mut store = MemoryStore::new();
    store.set(THEME_KEY, "dark").unwrap();
    store
        .set(SAVED_KEY, r#"[{"id":1,"img":"a","type":"photos","creator":"A"}]"#)
        .unwrap();
    let s = open_session(ScriptedTransport::new(), store);
    assert_eq!(s.theme(), Theme::Dark);
    assert_eq!(s.saved().len(), 1);
    let events = &s.surface().events;
    assert!(events.contains(&SurfaceEvent::Theme(Theme::Dark)));
    assert!(events.contains(&SurfaceEvent::SavedCount(1)));
    assert!(events.contains(&SurfaceEvent::Title("Explore Photos".to_string())));
}

#[test]
fn start_loads_first_page_of_default_query() {
    let s = started(MemoryStore::new());
    assert_eq!(s.query().query, "India");
    assert_eq!(s.query().page, 2);
    assert!(s.query().has_more);
    assert_eq!(s.feed().len(), 15);
    assert_eq!(s.surface().appended_ids().len(), 15);
}

#[test]
fn blank_search_is_ignored() {
    let mut s = started(MemoryStore::new());
    let before = s.surface().events.len();
    assert_eq!(s.search("   "), FetchResult::Skipped);
    assert_eq!(s.surface().events.len(), before);
    assert_eq!(s.query().query, "India");
}

#[test]
fn search_resets_and_sets_title() {
    let mut s = started(MemoryStore::new());
    s.search("Kerala");
    assert_eq!(s.query().query, "Kerala");
    assert_eq!(s.query().page, 1);
    assert!(s.feed().is_empty());
    assert!(s
        .surface()
        .events
        .contains(&SurfaceEvent::Title("Results for \"Kerala\"".to_string())));
}

#[test]
fn switch_kind_fetches_videos() {
    let t = ScriptedTransport::new();
    t.script(
        &format!("{BASE}/videos/search?query=India&page=1&per_page=15"),
        Scripted::Status(200, r#"{"videos": [{"id": 77, "image": "https://v.test/77.jpg"}]}"#.to_string()),
    );
    let mut s = open_session(t, MemoryStore::new());
    let r = s.switch_kind(MediaKind::Videos);
    assert_eq!(r, FetchResult::Appended { first_index: 0, count: 1 });
    let card = &s.feed().get(0).unwrap().card;
    assert!(card.is_video());
    assert_eq!(card.download_filename(), "pixelpro-77.mp4");
    assert!(s
        .surface()
        .events
        .contains(&SurfaceEvent::Title("Explore Videos".to_string())));
}

#[test]
fn filters_reset_the_feed() {
    let mut s = started(MemoryStore::new());
    s.set_orientation(Some(Orientation::Landscape));
    assert_eq!(s.query().orientation, Some(Orientation::Landscape));
    assert_eq!(s.query().page, 1);
    s.set_color(Some("  ".to_string()));
    assert!(s.query().color.is_none());
    s.set_color(Some("blue".to_string()));
    assert_eq!(s.query().color.as_deref(), Some("blue"));
}

#[test]
fn toggle_save_twice_updates_only_that_card() {
    let store = MemoryStore::new();
    let mut s = started(store.clone());
    s.surface_mut().events.clear();

    assert_eq!(s.toggle_save_card(3), Some(Toggled::Added));
    assert!(s.feed().get(3).unwrap().card.saved);
    assert_eq!(s.toggle_save_card(3), Some(Toggled::Removed));
    assert!(!s.feed().get(3).unwrap().card.saved);
    assert!(s.saved().is_empty());

    let surface = s.surface();
    assert_eq!(
        surface.count(|e| matches!(e, SurfaceEvent::UpdateCard { index: 3, .. })),
        2
    );
    assert_eq!(surface.count(|e| matches!(e, SurfaceEvent::Append { .. } | SurfaceEvent::ClearFeed)), 0);
    assert_eq!(surface.notices(), vec!["Item Saved!", "Removed from Saved"]);
    assert_eq!(surface.last_saved_count(), Some(0));
    assert_eq!(store.get(SAVED_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn toggle_save_unknown_index_is_none() {
    let mut s = started(MemoryStore::new());
    assert_eq!(s.toggle_save_card(99), None);
}

#[test]
fn open_panel_rerenders_after_each_mutation() {
    let mut s = started(MemoryStore::new());
    s.toggle_save_card(0);
    assert_eq!(s.surface().count(|e| matches!(e, SurfaceEvent::SavedPanel(_))), 0);

    s.open_saved_panel();
    s.toggle_save_card(1);
    assert_eq!(s.surface().events.iter().rev().find(|e| matches!(e, SurfaceEvent::SavedPanel(_))), Some(&SurfaceEvent::SavedPanel(vec![1, 2])));

    s.remove_saved(1);
    assert_eq!(s.surface().events.iter().rev().find(|e| matches!(e, SurfaceEvent::SavedPanel(_))), Some(&SurfaceEvent::SavedPanel(vec![2])));
    // The grid card for the removed item flips back.
    assert!(!s.feed().get(0).unwrap().card.saved);

    s.close_saved_panel();
    let panels = s.surface().count(|e| matches!(e, SurfaceEvent::SavedPanel(_)));
    s.clear_saved();
    assert_eq!(s.surface().count(|e| matches!(e, SurfaceEvent::SavedPanel(_))), panels);
    assert_eq!(s.surface().last_saved_count(), Some(0));
    assert!(!s.feed().get(1).unwrap().card.saved);
}

#[test]
fn remove_absent_saved_item_is_noop() {
    let store = MemoryStore::new();
    let mut s = started(store.clone());
    s.toggle_save_card(0);
    let writes = store.write_count();
    let record = store.get(SAVED_KEY).unwrap();
    let events = s.surface().events.len();

    assert!(!s.remove_saved(4242));
    assert_eq!(s.saved().len(), 1);
    assert_eq!(store.write_count(), writes);
    assert_eq!(store.get(SAVED_KEY).unwrap(), record);
    assert_eq!(s.surface().events.len(), events);
}

#[test]
fn detail_view_tags_and_related_strip() {
    let t = ScriptedTransport::new();
    t.script(&page_url("India", 1), Scripted::Status(200, fifteen()));
    t.script(
        &related_url("Sunset"),
        Scripted::Status(200, photos_body(&[photo(501, Some("Golden dunes")), photo(502, None)])),
    );
    t.script(&related_url("Golden"), Scripted::Status(200, r#"{"photos": []}"#.to_string()));
    let mut s = open_session(t, MemoryStore::new());
    s.start();

    assert!(s.open_card(2));
    let detail = s.detail().unwrap();
    assert_eq!(detail.item.id, 3);
    assert_eq!(detail.tags, vec!["Sunset", "over", "Himalayas", "India"]);
    assert_eq!(s.related().unwrap().items().len(), 2);
    let pending = s
        .surface()
        .events
        .iter()
        .position(|e| matches!(e, SurfaceEvent::ShowRelated(r) if r.outcome == RelatedOutcome::Pending));
    assert!(pending.is_some());

    // Related item replaces the subject.
    assert!(s.select_related(0));
    assert_eq!(s.detail().unwrap().item.id, 501);
    assert_eq!(s.related().unwrap().outcome, RelatedOutcome::Empty);
    assert!(!s.select_related(5));
}

#[test]
fn tag_chip_closes_detail_and_searches() {
    let t = ScriptedTransport::new();
    t.script(&page_url("India", 1), Scripted::Status(200, fifteen()));
    t.script(&page_url("Himalayas", 1), Scripted::Status(200, photos_body(&[photo(900, None)])));
    let mut s = open_session(t, MemoryStore::new());
    s.start();
    s.open_card(0);

    let r = s.select_tag(2);
    assert_eq!(r, FetchResult::Appended { first_index: 0, count: 1 });
    assert!(s.detail().is_none());
    assert!(s.surface().events.contains(&SurfaceEvent::CloseDetail));
    assert_eq!(s.query().query, "Himalayas");
    assert_eq!(s.feed().get(0).unwrap().card.id, 900);
}

#[test]
fn download_failure_opens_externally() {
    let mut s = started(MemoryStore::new());
    let out = s.download_card(0).unwrap();
    let url = "https://images.example.com/1/original.jpeg".to_string();
    assert_eq!(out, DownloadOutcome::OpenExternally(url.clone()));
    assert!(s.surface().events.contains(&SurfaceEvent::OpenExternal(url)));
    let notices = s.surface().notices();
    assert_eq!(&notices[notices.len() - 2..], ["Downloading...", "Opened in New Tab"]);
}

#[test]
fn download_detail_saves_original() {
    let dir = tempfile::tempdir().unwrap();
    let t = ScriptedTransport::new();
    t.script(&page_url("India", 1), Scripted::Status(200, fifteen()));
    t.script_bytes("https://images.example.com/4/original.jpeg", 200, b"ORIGINAL".to_vec());
    let cfg = PixelProConfig {
        download_dir: Some(dir.path().to_path_buf()),
        ..config()
    };
    let mut s = Session::open(cfg, t, MemoryStore::new(), RecordingSurface::default());
    s.start();
    s.open_card(3);

    let out = s.download_detail().unwrap();
    let path = dir.path().join("pixelpro-4.jpeg");
    assert_eq!(out, DownloadOutcome::Saved(path.clone()));
    assert_eq!(std::fs::read(path).unwrap(), b"ORIGINAL");
    assert_eq!(s.surface().notices().last().map(String::as_str), Some("Download Complete!"));
}

#[test]
fn theme_toggle_applies_and_persists() {
    let store = MemoryStore::new();
    let mut s = open_session(ScriptedTransport::new(), store.clone());
    assert_eq!(s.toggle_theme(), Theme::Dark);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(s.toggle_theme(), Theme::Light);
    assert_eq!(s.surface().events.last(), Some(&SurfaceEvent::Theme(Theme::Light)));
}

#[test]
fn close_returns_surface() {
    let s = started(MemoryStore::new());
    let surface = s.close();
    assert!(!surface.events.is_empty());
}

#[test]
fn failed_store_write_keeps_state_and_session_usable() {
    let t = ScriptedTransport::new();
    t.script(&page_url("India", 1), Scripted::Status(200, fifteen()));
    let mut s = Session::open(config(), t, FailingStore, RecordingSurface::default());
    s.start();
    s.surface_mut().events.clear();

    assert_eq!(s.toggle_save_card(2), None);
    assert!(!s.saved().is_saved(3));
    assert!(!s.feed().get(2).unwrap().card.saved);
    assert_eq!(s.surface().count(|e| matches!(e, SurfaceEvent::UpdateCard { .. })), 0);
    assert_eq!(s.surface().last_saved_count(), None);

    s.clear_saved();
    assert_eq!(s.toggle_theme(), Theme::Light);
    assert_eq!(s.theme(), Theme::Light);
    assert_eq!(s.surface().count(|e| matches!(e, SurfaceEvent::Theme(_))), 0);
    assert_eq!(s.surface().notices(), vec![STORE_WRITE_NOTICE; 3]);

    // Fetching still works afterwards.
    assert_eq!(s.load_more(), FetchResult::Exhausted);
}

#[test]
fn corrupt_store_file_opens_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_store.json");
    std::fs::write(&path, "{truncated").unwrap();

    let mut s = Session::open(config(), ScriptedTransport::new(), FileStore::new(&path), RecordingSurface::default());
    assert!(s.saved().is_empty());
    assert_eq!(s.theme(), Theme::Light);
    assert_eq!(s.surface().last_saved_count(), Some(0));

    // The next write replaces the corrupt file.
    assert_eq!(s.toggle_theme(), Theme::Dark);
    assert_eq!(FileStore::new(&path).get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn download_without_rendition_makes_no_request() {
    let t = ScriptedTransport::new();
    t.script(&page_url("India", 1), Scripted::Status(200, r#"{"photos": [{"id": 5}]}"#.to_string()));
    let mut s = open_session(t, MemoryStore::new());
    s.start();
    assert!(s.feed().get(0).unwrap().card.download_url.is_none());
    let requests = s.transport.requests().len();

    assert_eq!(s.download_card(0), None);
    assert_eq!(s.transport.requests().len(), requests);
    assert_eq!(
        s.surface().notices().last().map(String::as_str),
        Some("Nothing to download for this item.")
    );
    assert!(!s.surface().events.iter().any(|e| matches!(e, SurfaceEvent::OpenExternal(_))));
}
