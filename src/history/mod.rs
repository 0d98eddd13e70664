//! History and favorite storage.
//!
//! The free functions in [`store`], [`query`], [`remove`], and [`favorite`]
//! operate on an open [`rusqlite::Connection`] and wrap every multi-row write
//! in one transaction. [`repository`] layers the per-operation handle
//! lifecycle on top: each call opens the store, runs, and drops the handle.

pub mod favorite;
pub mod query;
pub mod remove;
pub mod repository;
pub mod store;
pub mod types;

pub use repository::{
    system_clock, Clock, FavoriteRepository, FavoriteStore, HistoryRepository, HistoryStore,
};
pub use types::{FavoriteEntry, HistoryEntry, MatchMode, NewHistory, Protection, RemoveStatus};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};

/// Columns selected for every history read, in [`types::HistoryEntry::from_row`] order.
pub(crate) const HISTORY_COLUMNS: &str =
    "id, phrase, prefix, suffix, is_favorited, created_at, updated_at";

/// Encode a timestamp as RFC 3339 text with second precision.
pub(crate) fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decode a stored timestamp, mapping parse failures onto rusqlite's
/// conversion error for column `idx`.
pub(crate) fn decode_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// `instr(column, ?k) > 0` for each keyword, joined by the match mode.
/// Placeholders start at `?1`.
pub(crate) fn keyword_clause(column: &str, count: usize, mode: MatchMode) -> String {
    let joiner = match mode {
        MatchMode::And => " AND ",
        MatchMode::Or => " OR ",
    };
    (1..=count)
        .map(|i| format!("instr({column}, ?{i}) > 0"))
        .collect::<Vec<_>>()
        .join(joiner)
}

/// Keyword bind values, in placeholder order.
pub(crate) fn keyword_params(keywords: &[String]) -> Vec<Value> {
    keywords.iter().map(|k| Value::Text(k.clone())).collect()
}

/// Ids in first-seen order with duplicates dropped.
pub(crate) fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
