mod helpers;

use helpers::{count_rows, fixed_clock, TestStore};
use jrp::history::{
    FavoriteRepository, HistoryRepository, MatchMode, NewHistory, Protection, RemoveStatus,
};

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn show_on_absent_store_is_empty() {
    let store = TestStore::new();
    let rows = store.history().get_history_with_number(10).unwrap();
    assert!(rows.is_empty());
    assert!(!store.path.exists());
}

#[test]
fn insert_one_then_show() {
    let store = TestStore::new();
    store
        .history()
        .save_history(&[NewHistory::with_parts("test", "", "")])
        .unwrap();

    let rows = store.history().get_history_with_number(10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].phrase, "test");
    assert_eq!(rows[0].prefix.as_deref(), Some(""));
    assert!(!rows[0].is_favorited);
    assert_eq!(rows[0].created_at, fixed_clock());
    assert_eq!(rows[0].updated_at, fixed_clock());
}

#[test]
fn favorite_promotion_marks_history() {
    let store = TestStore::new();
    store.seed(&["test"]);

    assert_eq!(store.favorites().add_favorite_by_ids(&[1]).unwrap(), 1);

    let favorites = store.favorites().get_all_favorite().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id(), 1);
    assert_eq!(favorites[0].favorited_at, fixed_clock());

    let history = store.history().get_all_history().unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].is_favorited);
}

#[test]
fn protected_bulk_remove_then_forced() {
    let store = TestStore::new();
    store.seed(&["test"]);
    store.favorites().add_favorite_by_ids(&[1]).unwrap();

    let status = store.history().remove_history_all(Protection::KeepFavorites);
    assert!(matches!(status, RemoveStatus::RemovedNone));
    assert_eq!(store.history().get_all_history().unwrap().len(), 1);

    let status = store.history().remove_history_all(Protection::Force);
    assert!(matches!(status, RemoveStatus::RemovedSuccessfully));
    assert!(store.history().get_all_history().unwrap().is_empty());
    assert!(store.favorites().get_all_favorite().unwrap().is_empty());
    assert_eq!(count_rows(&store.path, "favorite"), 0);
}

#[test]
fn partial_selective_remove() {
    let store = TestStore::new();
    assert_eq!(store.seed(&["test1", "test2"]), vec![1, 2]);

    let status = store
        .history()
        .remove_history_by_ids(&[2, 3], Protection::KeepFavorites);
    assert!(matches!(status, RemoveStatus::RemovedNotAll));

    let remaining = store.history().get_all_history().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 1);
    assert_eq!(remaining[0].phrase, "test1");
}

#[test]
fn keyword_search_and_within_window() {
    let store = TestStore::new();
    store.seed_numbered(11);

    let rows = store
        .history()
        .search_history_with_number(10, &kw(&["te", "st"]), MatchMode::And)
        .unwrap();
    let ids: Vec<i64> = rows.iter().map(|h| h.id).collect();
    assert_eq!(ids, (2..=11).collect::<Vec<i64>>());
    assert_eq!(rows.len(), 10);
}

#[test]
fn keyword_search_or_without_match() {
    let store = TestStore::new();
    store.seed_numbered(11);

    let rows = store
        .history()
        .search_history_with_number(10, &kw(&["test99"]), MatchMode::Or)
        .unwrap();
    assert!(rows.is_empty());
}
