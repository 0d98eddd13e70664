//! Favorite promotion, listing, and removal.
//!
//! A favorite row shares its id with a history row. Promotion and demotion
//! keep `history.is_favorited` in step and bump `history.updated_at`.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::types::{FavoriteEntry, MatchMode, RemoveStatus};
use super::{distinct_ids, encode_ts, keyword_clause, keyword_params};
use crate::error::Result;

/// History columns (prefixed `h.`) followed by the favorite's `created_at`.
const FAVORITE_COLUMNS: &str = "h.id, h.phrase, h.prefix, h.suffix, h.is_favorited, \
     h.created_at, h.updated_at, f.created_at";

/// Promote the history rows named by `ids`. Unknown and already-favorited ids
/// are skipped. Returns the number of rows promoted.
pub fn add_favorite_by_ids(conn: &mut Connection, ids: &[i64], now: DateTime<Utc>) -> Result<usize> {
    let requested = distinct_ids(ids);
    if requested.is_empty() {
        return Ok(0);
    }

    let ts = encode_ts(now);
    let tx = conn.transaction()?;
    let mut added = 0usize;
    for id in &requested {
        let favorited: Option<bool> = tx
            .query_row(
                "SELECT is_favorited FROM history WHERE id = ?1",
                params![id],
                |row| row.get::<_, i64>(0).map(|v| v != 0),
            )
            .optional()?;

        match favorited {
            None => tracing::debug!(id, "no history row to favorite"),
            Some(true) => tracing::debug!(id, "already favorited"),
            Some(false) => {
                tx.execute(
                    "INSERT OR IGNORE INTO favorite (id, created_at, updated_at) VALUES (?1, ?2, ?2)",
                    params![id, ts],
                )?;
                tx.execute(
                    "UPDATE history SET is_favorited = 1, updated_at = ?1 WHERE id = ?2",
                    params![ts, id],
                )?;
                added += 1;
            }
        }
    }
    tx.commit()?;

    tracing::debug!(requested = requested.len(), added, "favorites added");
    Ok(added)
}

/// Every favorite, ordered by history id.
pub fn get_all_favorite(conn: &Connection) -> Result<Vec<FavoriteEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FAVORITE_COLUMNS} FROM favorite f JOIN history h ON h.id = f.id ORDER BY h.id ASC"
    ))?;
    let rows = stmt
        .query_map([], FavoriteEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// The `n` favorites with the largest ids. `n <= 0` yields nothing.
pub fn get_favorite_with_number(conn: &Connection, n: i64) -> Result<Vec<FavoriteEntry>> {
    if n <= 0 {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM \
         (SELECT {FAVORITE_COLUMNS} FROM favorite f JOIN history h ON h.id = f.id \
          ORDER BY h.id DESC LIMIT ?1) \
         ORDER BY 1 ASC"
    ))?;
    let rows = stmt
        .query_map(params![n], FavoriteEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Favorites whose phrase matches `keywords`. No keywords yields nothing.
pub fn search_all_favorite(
    conn: &Connection,
    keywords: &[String],
    mode: MatchMode,
) -> Result<Vec<FavoriteEntry>> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }
    let clause = keyword_clause("h.phrase", keywords.len(), mode);
    let mut stmt = conn.prepare(&format!(
        "SELECT {FAVORITE_COLUMNS} FROM favorite f JOIN history h ON h.id = f.id \
         WHERE ({clause}) ORDER BY h.id ASC"
    ))?;
    let rows = stmt
        .query_map(params_from_iter(keyword_params(keywords)), FavoriteEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Matches within the last `n` favorites.
pub fn search_favorite_with_number(
    conn: &Connection,
    n: i64,
    keywords: &[String],
    mode: MatchMode,
) -> Result<Vec<FavoriteEntry>> {
    if n <= 0 || keywords.is_empty() {
        return Ok(Vec::new());
    }
    // The window is materialized first, so the keyword clause filters its
    // `phrase` column (position 2) by name.
    let clause = keyword_clause("phrase", keywords.len(), mode);
    let limit_idx = keywords.len() + 1;
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM \
         (SELECT {FAVORITE_COLUMNS} FROM favorite f JOIN history h ON h.id = f.id \
          ORDER BY h.id DESC LIMIT ?{limit_idx}) \
         WHERE ({clause}) ORDER BY 1 ASC"
    ))?;

    let mut values = keyword_params(keywords);
    values.push(Value::Integer(n));
    let rows = stmt
        .query_map(params_from_iter(values), FavoriteEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Demote the favorites named by `ids`. History rows are never deleted here.
pub fn remove_favorite_by_ids(
    conn: &mut Connection,
    ids: &[i64],
    now: DateTime<Utc>,
) -> Result<RemoveStatus> {
    let requested = distinct_ids(ids);
    if requested.is_empty() {
        return Ok(RemoveStatus::RemovedNone);
    }

    let ts = encode_ts(now);
    let tx = conn.transaction()?;
    let mut removed = 0usize;
    for id in &requested {
        let deleted = tx.execute("DELETE FROM favorite WHERE id = ?1", params![id])?;
        if deleted == 0 {
            tracing::debug!(id, "not a favorite");
            continue;
        }
        tx.execute(
            "UPDATE history SET is_favorited = 0, updated_at = ?1 WHERE id = ?2",
            params![ts, id],
        )?;
        removed += deleted;
    }
    tx.commit()?;

    let status = RemoveStatus::from_counts(requested.len(), removed);
    tracing::debug!(requested = requested.len(), removed, %status, "favorites removed by ids");
    Ok(status)
}

/// Demote every favorite.
pub fn remove_favorite_all(conn: &mut Connection, now: DateTime<Utc>) -> Result<RemoveStatus> {
    let tx = conn.transaction()?;
    let total: i64 = tx.query_row("SELECT COUNT(*) FROM favorite", [], |row| row.get(0))?;
    if total == 0 {
        return Ok(RemoveStatus::RemovedNone);
    }

    let removed = tx.execute("DELETE FROM favorite", [])?;
    tx.execute(
        "UPDATE history SET is_favorited = 0, updated_at = ?1 WHERE is_favorited = 1",
        params![encode_ts(now)],
    )?;
    tx.commit()?;

    let status = RemoveStatus::from_counts(total as usize, removed);
    tracing::debug!(total, removed, %status, "favorites cleared");
    Ok(status)
}
