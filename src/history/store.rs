//! Write path for new history rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};

use super::types::{HistoryEntry, NewHistory};
use crate::error::Result;

/// Insert `records` in order inside one transaction and return the stored rows.
///
/// Every row gets `created_at = updated_at = now` and `is_favorited = 0`.
pub fn save_history_entries(
    conn: &mut Connection,
    records: &[NewHistory],
    now: DateTime<Utc>,
) -> Result<Vec<HistoryEntry>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let tx = conn.transaction()?;
    let saved = insert_rows(&tx, records, now, false)?;
    tx.commit()?;

    tracing::debug!(count = saved.len(), "history saved");
    Ok(saved)
}

/// Insert `records` already favorited: history rows with `is_favorited = 1`
/// and their favorite rows, all in one transaction.
pub fn save_favorited_entries(
    conn: &mut Connection,
    records: &[NewHistory],
    now: DateTime<Utc>,
) -> Result<Vec<HistoryEntry>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let tx = conn.transaction()?;
    let saved = insert_rows(&tx, records, now, true)?;
    {
        let ts = super::encode_ts(now);
        let mut stmt =
            tx.prepare("INSERT INTO favorite (id, created_at, updated_at) VALUES (?1, ?2, ?2)")?;
        for entry in &saved {
            stmt.execute(params![entry.id, ts])?;
        }
    }
    tx.commit()?;

    tracing::debug!(count = saved.len(), "history saved as favorites");
    Ok(saved)
}

fn insert_rows(
    tx: &Transaction<'_>,
    records: &[NewHistory],
    now: DateTime<Utc>,
    favorited: bool,
) -> Result<Vec<HistoryEntry>> {
    let ts = super::encode_ts(now);
    let mut stmt = tx.prepare(
        "INSERT INTO history (phrase, prefix, suffix, is_favorited, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )?;
    let mut saved = Vec::with_capacity(records.len());
    for record in records {
        stmt.execute(params![record.phrase, record.prefix, record.suffix, favorited, ts])?;
        saved.push(HistoryEntry {
            id: tx.last_insert_rowid(),
            phrase: record.phrase.clone(),
            prefix: record.prefix.clone(),
            suffix: record.suffix.clone(),
            is_favorited: favorited,
            created_at: now,
            updated_at: now,
        });
    }
    Ok(saved)
}

/// Insert `records` and return how many rows were written.
pub fn save_history(
    conn: &mut Connection,
    records: &[NewHistory],
    now: DateTime<Utc>,
) -> Result<usize> {
    save_history_entries(conn, records, now).map(|saved| saved.len())
}
