//! History removal, selective and bulk.
//!
//! Under [`Protection::KeepFavorites`] a favorited row is never deleted and
//! counts as a miss. Under [`Protection::Force`] it is deleted together with
//! its favorite row. Both run in one transaction, so a fault leaves the store
//! as it was.

use rusqlite::{params, Connection, OptionalExtension};

use super::distinct_ids;
use super::types::{Protection, RemoveStatus};
use crate::error::Result;

/// Remove the history rows named by `ids`.
///
/// Returns one of the non-failed statuses; faults come back as `Err`. Use
/// [`RemoveStatus::from_result`] to fold them into `RemovedFailed`.
pub fn remove_history_by_ids(
    conn: &mut Connection,
    ids: &[i64],
    protection: Protection,
) -> Result<RemoveStatus> {
    let requested = distinct_ids(ids);
    if requested.is_empty() {
        return Ok(RemoveStatus::RemovedNone);
    }

    let tx = conn.transaction()?;
    let mut removed = 0usize;
    for id in &requested {
        let favorited: Option<bool> = tx
            .query_row(
                "SELECT is_favorited FROM history WHERE id = ?1",
                params![id],
                |row| row.get::<_, i64>(0).map(|v| v != 0),
            )
            .optional()?;

        match (favorited, protection) {
            (None, _) => {
                tracing::debug!(id, "history row not found");
            }
            (Some(true), Protection::KeepFavorites) => {
                tracing::debug!(id, "history row is favorited, kept");
            }
            (Some(true), Protection::Force) => {
                tx.execute("DELETE FROM favorite WHERE id = ?1", params![id])?;
                removed += tx.execute("DELETE FROM history WHERE id = ?1", params![id])?;
            }
            (Some(false), _) => {
                removed += tx.execute("DELETE FROM history WHERE id = ?1", params![id])?;
            }
        }
    }
    tx.commit()?;

    let status = RemoveStatus::from_counts(requested.len(), removed);
    tracing::debug!(requested = requested.len(), removed, %status, "history removed by ids");
    Ok(status)
}

/// Remove every history row allowed by `protection`.
pub fn remove_history_all(conn: &mut Connection, protection: Protection) -> Result<RemoveStatus> {
    let tx = conn.transaction()?;
    let total: i64 = tx.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
    if total == 0 {
        return Ok(RemoveStatus::RemovedNone);
    }

    let removed = match protection {
        Protection::Force => {
            tx.execute("DELETE FROM favorite", [])?;
            tx.execute("DELETE FROM history", [])?
        }
        Protection::KeepFavorites => tx.execute("DELETE FROM history WHERE is_favorited = 0", [])?,
    };
    tx.commit()?;

    let status = RemoveStatus::from_counts(total as usize, removed);
    tracing::debug!(total, removed, %status, "history cleared");
    Ok(status)
}
