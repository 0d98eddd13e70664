mod helpers;

use std::collections::BTreeSet;

use helpers::TestStore;
use jrp::history::{
    FavoriteRepository, HistoryEntry, HistoryRepository, MatchMode, NewHistory, Protection,
    RemoveStatus,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;

fn ids<T: AsRef<HistoryEntry>>(rows: &[T]) -> Vec<i64> {
    rows.iter().map(|r| r.as_ref().id).collect()
}

/// is_favorited mirrors membership in the favorite table, read straight from SQL.
fn assert_favorite_flag_consistent(store: &TestStore) {
    let conn = Connection::open(&store.path).unwrap();
    let mismatched: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM history h
             WHERE h.is_favorited != EXISTS(SELECT 1 FROM favorite f WHERE f.id = h.id)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM favorite f WHERE NOT EXISTS(SELECT 1 FROM history h WHERE h.id = f.id)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(mismatched, 0, "is_favorited out of sync");
    assert_eq!(orphans, 0, "favorite row without history");
}

#[test]
fn favorite_flag_stays_consistent_under_random_operations() {
    let store = TestStore::new();
    let mut rng = StdRng::seed_from_u64(2024);
    store.seed_numbered(20);

    for _ in 0..200 {
        let id = rng.gen_range(1..=30);
        match rng.gen_range(0..6) {
            0 => {
                store.seed(&["again"]);
            }
            1 => {
                store.favorites().add_favorite_by_ids(&[id]).unwrap();
            }
            2 => {
                assert!(!store.favorites().remove_favorite_by_ids(&[id]).is_failed());
            }
            3 => {
                let protection = if rng.gen_bool(0.5) {
                    Protection::Force
                } else {
                    Protection::KeepFavorites
                };
                assert!(!store.history().remove_history_by_ids(&[id], protection).is_failed());
            }
            4 => {
                assert!(!store
                    .history()
                    .remove_history_all(Protection::KeepFavorites)
                    .is_failed());
            }
            _ => {
                assert!(!store.favorites().remove_favorite_all().is_failed());
            }
        }
        assert_favorite_flag_consistent(&store);
    }
}

#[test]
fn new_ids_continue_from_the_current_maximum() {
    let store = TestStore::new();
    assert_eq!(store.seed(&["a", "b", "c"]), vec![1, 2, 3]);

    // removing the lower ids does not reset numbering
    store
        .history()
        .remove_history_by_ids(&[1, 2], Protection::Force);
    assert_eq!(store.seed(&["d", "e"]), vec![4, 5]);

    let batch = store.seed(&["f", "g", "h", "i"]);
    assert!(batch.windows(2).all(|w| w[1] == w[0] + 1));
    assert_eq!(batch[0], 6);
}

#[test]
fn with_number_returns_the_tail() {
    let store = TestStore::new();
    store.seed_numbered(7);
    let all = store.history().get_all_history().unwrap();

    for n in 0..10i64 {
        let rows = store.history().get_history_with_number(n).unwrap();
        let expected = (n as usize).min(all.len());
        assert_eq!(rows.len(), expected, "n = {n}");

        let mut top: Vec<i64> = ids(&all).into_iter().rev().take(expected).collect();
        top.reverse();
        assert_eq!(ids(&rows), top, "n = {n}");
    }
}

#[test]
fn windowed_search_is_a_filtered_tail() {
    let store = TestStore::new();
    store.seed(&[
        "あかいねこ",
        "しろいいぬ",
        "あかいいぬ",
        "くろいねこ",
        "しろいねこ",
        "あかいとり",
    ]);
    let cases: Vec<(Vec<String>, MatchMode)> = vec![
        (vec!["あかい".into()], MatchMode::Or),
        (vec!["ねこ".into(), "いぬ".into()], MatchMode::Or),
        (vec!["あかい".into(), "ねこ".into()], MatchMode::And),
        (vec!["いぬ".into(), "しろい".into()], MatchMode::And),
    ];

    for n in 0..8i64 {
        let window: BTreeSet<i64> = ids(&store.history().get_history_with_number(n).unwrap())
            .into_iter()
            .collect();
        for (keywords, mode) in &cases {
            let rows = store
                .history()
                .search_history_with_number(n, keywords, *mode)
                .unwrap();
            for row in &rows {
                assert!(window.contains(&row.id), "id {} outside window {n}", row.id);
                let hits = keywords.iter().filter(|k| row.phrase.contains(k.as_str())).count();
                match mode {
                    MatchMode::And => assert_eq!(hits, keywords.len()),
                    MatchMode::Or => assert!(hits > 0),
                }
            }
        }
    }
}

#[test]
fn search_is_case_sensitive() {
    let store = TestStore::new();
    store.seed(&["Test", "test"]);
    let rows = store
        .history()
        .search_all_history(&["test".to_string()], MatchMode::Or)
        .unwrap();
    assert_eq!(ids(&rows), vec![2]);
}

#[test]
fn removing_twice_removes_nothing_the_second_time() {
    let store = TestStore::new();
    store.seed_numbered(3);

    let first = store
        .history()
        .remove_history_by_ids(&[1, 3], Protection::KeepFavorites);
    assert!(matches!(first, RemoveStatus::RemovedSuccessfully));
    let second = store
        .history()
        .remove_history_by_ids(&[1, 3], Protection::KeepFavorites);
    assert!(matches!(second, RemoveStatus::RemovedNone));

    store.favorites().add_favorite_by_ids(&[2]).unwrap();
    let first = store.favorites().remove_favorite_by_ids(&[2]);
    assert!(matches!(first, RemoveStatus::RemovedSuccessfully));
    let second = store.favorites().remove_favorite_by_ids(&[2]);
    assert!(matches!(second, RemoveStatus::RemovedNone));
}

#[test]
fn favoriting_twice_is_a_no_op() {
    let store = TestStore::new();
    store.seed_numbered(2);

    assert_eq!(store.favorites().add_favorite_by_ids(&[1, 2]).unwrap(), 2);
    let before = store.favorites().get_all_favorite().unwrap();

    assert_eq!(store.favorites().add_favorite_by_ids(&[1, 2, 2]).unwrap(), 0);
    let after = store.favorites().get_all_favorite().unwrap();
    assert_eq!(ids(&before), ids(&after));
    assert_eq!(before[0].favorited_at, after[0].favorited_at);
}

#[test]
fn keep_favorites_never_deletes_a_favorite() {
    let store = TestStore::new();
    store.seed_numbered(6);
    store.favorites().add_favorite_by_ids(&[2, 4, 6]).unwrap();

    let status = store
        .history()
        .remove_history_by_ids(&[1, 2, 3, 4], Protection::KeepFavorites);
    assert!(matches!(status, RemoveStatus::RemovedNotAll));
    let status = store.history().remove_history_all(Protection::KeepFavorites);
    assert!(matches!(status, RemoveStatus::RemovedNotAll));

    assert_eq!(ids(&store.history().get_all_history().unwrap()), vec![2, 4, 6]);
    assert_eq!(ids(&store.favorites().get_all_favorite().unwrap()), vec![2, 4, 6]);
}

#[test]
fn save_then_get_all_appends_in_order() {
    let store = TestStore::new();
    store.seed(&["one", "two"]);
    let prior = store.history().get_all_history().unwrap();

    let records = vec![
        NewHistory::with_parts("あかいねこです", "あかい", "です"),
        NewHistory::new("plain"),
        NewHistory::with_parts("しろいいぬだよ", "しろい", "だよ"),
    ];
    let saved = store.history().save_history(&records).unwrap();
    let all = store.history().get_all_history().unwrap();

    assert_eq!(all.len(), prior.len() + records.len());
    assert_eq!(&all[..prior.len()], &prior[..]);
    assert_eq!(&all[prior.len()..], &saved[..]);
    for (row, record) in all[prior.len()..].iter().zip(&records) {
        assert_eq!(row.phrase, record.phrase);
        assert_eq!(row.prefix, record.prefix);
        assert_eq!(row.suffix, record.suffix);
    }
}

#[test]
fn add_then_get_all_favorite_is_a_union() {
    let store = TestStore::new();
    store.seed_numbered(5);
    store.favorites().add_favorite_by_ids(&[1]).unwrap();

    // 9 does not exist and must not appear
    store.favorites().add_favorite_by_ids(&[3, 5, 9]).unwrap();
    assert_eq!(ids(&store.favorites().get_all_favorite().unwrap()), vec![1, 3, 5]);
}
