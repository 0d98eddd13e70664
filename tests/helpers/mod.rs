#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use jrp::db;
use jrp::history::{FavoriteStore, HistoryRepository, HistoryStore, NewHistory};
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// Every row created in tests is stamped with this instant.
pub fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap()
}

/// Open a fresh in-memory store with the schema applied.
pub fn test_db() -> Connection {
    db::open_memory_store().unwrap()
}

/// A store path inside a temp dir. The file itself is not created.
pub struct TestStore {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jrp").join("jrp.db");
        Self { dir, path }
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::with_clock(&self.path, fixed_clock)
    }

    pub fn favorites(&self) -> FavoriteStore {
        FavoriteStore::with_clock(&self.path, fixed_clock)
    }

    /// Save phrases with empty prefix and suffix; returns their ids.
    pub fn seed(&self, phrases: &[&str]) -> Vec<i64> {
        let records: Vec<NewHistory> = phrases
            .iter()
            .map(|p| NewHistory::with_parts(*p, "", ""))
            .collect();
        self.history()
            .save_history(&records)
            .unwrap()
            .into_iter()
            .map(|h| h.id)
            .collect()
    }

    /// Seed `test1..test{n}`.
    pub fn seed_numbered(&self, n: usize) -> Vec<i64> {
        let phrases: Vec<String> = (1..=n).map(|i| format!("test{i}")).collect();
        let refs: Vec<&str> = phrases.iter().map(String::as_str).collect();
        self.seed(&refs)
    }
}

/// Write a word database at `path` with `(word, word_type, category)` rows.
pub fn write_word_db(path: &Path, rows: &[(&str, &str, &str)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE word (
            id INTEGER PRIMARY KEY,
            word TEXT NOT NULL,
            word_type TEXT NOT NULL,
            category TEXT NOT NULL
        );",
    )
    .unwrap();
    for (word, word_type, category) in rows {
        conn.execute(
            "INSERT INTO word (word, word_type, category) VALUES (?1, ?2, ?3)",
            params![word, word_type, category],
        )
        .unwrap();
    }
}

/// A small but complete `general` dictionary.
pub fn sample_words() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("あかい", "prefix", "general"),
        ("しろい", "prefix", "general"),
        ("くろい", "prefix", "general"),
        ("ねこ", "middle", "general"),
        ("いぬ", "middle", "general"),
        ("とり", "middle", "general"),
        ("さかな", "middle", "general"),
        ("です", "suffix", "general"),
        ("だよ", "suffix", "general"),
    ]
}

/// Write [`sample_words`] into `dir/word.db` and return its path.
pub fn sample_word_db(dir: &Path) -> PathBuf {
    let path = dir.join("word.db");
    write_word_db(&path, &sample_words());
    path
}

/// Raw row counts, bypassing the repositories.
pub fn count_rows(path: &Path, table: &str) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
