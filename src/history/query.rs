//! Read path for history: full listing, last-N windows, and keyword search.
//!
//! Every result is ordered by `id` ascending. A window of `n` means the `n`
//! rows with the largest ids; searches take the window first and filter
//! inside it.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

use super::types::{HistoryEntry, MatchMode};
use super::{keyword_clause, keyword_params, HISTORY_COLUMNS};
use crate::error::Result;

/// Every history row.
pub fn get_all_history(conn: &Connection) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM history ORDER BY id ASC"
    ))?;
    let rows = stmt
        .query_map([], HistoryEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// The last `n` history rows. `n <= 0` yields nothing.
pub fn get_history_with_number(conn: &Connection, n: i64) -> Result<Vec<HistoryEntry>> {
    if n <= 0 {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM \
         (SELECT {HISTORY_COLUMNS} FROM history ORDER BY id DESC LIMIT ?1) \
         ORDER BY id ASC"
    ))?;
    let rows = stmt
        .query_map(params![n], HistoryEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// History rows whose phrase matches `keywords` (case-sensitive substring).
/// No keywords yields nothing.
pub fn search_all_history(
    conn: &Connection,
    keywords: &[String],
    mode: MatchMode,
) -> Result<Vec<HistoryEntry>> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }
    let clause = keyword_clause("phrase", keywords.len(), mode);
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM history WHERE ({clause}) ORDER BY id ASC"
    ))?;
    let rows = stmt
        .query_map(params_from_iter(keyword_params(keywords)), HistoryEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Matches within the last `n` history rows.
pub fn search_history_with_number(
    conn: &Connection,
    n: i64,
    keywords: &[String],
    mode: MatchMode,
) -> Result<Vec<HistoryEntry>> {
    if n <= 0 || keywords.is_empty() {
        return Ok(Vec::new());
    }
    let clause = keyword_clause("phrase", keywords.len(), mode);
    let limit_idx = keywords.len() + 1;
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM \
         (SELECT {HISTORY_COLUMNS} FROM history ORDER BY id DESC LIMIT ?{limit_idx}) \
         WHERE ({clause}) ORDER BY id ASC"
    ))?;

    let mut values = keyword_params(keywords);
    values.push(Value::Integer(n));
    let rows = stmt
        .query_map(params_from_iter(values), HistoryEntry::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::history::store::save_history;
    use crate::history::types::NewHistory;
    use chrono::{TimeZone, Utc};

    fn seeded(phrases: &[&str]) -> Connection {
        let mut conn = db::open_memory_store().unwrap();
        let records: Vec<NewHistory> = phrases.iter().map(|p| NewHistory::new(*p)).collect();
        let now = Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap();
        save_history(&mut conn, &records, now).unwrap();
        conn
    }

    fn ids(rows: &[HistoryEntry]) -> Vec<i64> {
        rows.iter().map(|h| h.id).collect()
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_window_returns_tail_in_ascending_order() {
        let conn = seeded(&["a", "b", "c", "d", "e"]);
        assert_eq!(ids(&get_history_with_number(&conn, 3).unwrap()), vec![3, 4, 5]);
        assert_eq!(
            ids(&get_history_with_number(&conn, 10).unwrap()),
            vec![1, 2, 3, 4, 5]
        );
        assert!(get_history_with_number(&conn, 0).unwrap().is_empty());
        assert!(get_history_with_number(&conn, -1).unwrap().is_empty());
    }

    #[test]
    fn test_search_and_or() {
        let conn = seeded(&["あかいねこ", "しろいねこ", "あかいいぬ"]);
        assert_eq!(
            ids(&search_all_history(&conn, &kw(&["あかい", "ねこ"]), MatchMode::And).unwrap()),
            vec![1]
        );
        assert_eq!(
            ids(&search_all_history(&conn, &kw(&["しろい", "いぬ"]), MatchMode::Or).unwrap()),
            vec![2, 3]
        );
        assert!(search_all_history(&conn, &[], MatchMode::Or).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let conn = seeded(&["Test", "test"]);
        assert_eq!(
            ids(&search_all_history(&conn, &kw(&["test"]), MatchMode::Or).unwrap()),
            vec![2]
        );
    }

    #[test]
    fn test_search_window_applies_before_filter() {
        // "match" rows are 1 and 2, outside a window of the last 2 rows
        let conn = seeded(&["match1", "match2", "other3", "other4"]);
        assert!(search_history_with_number(&conn, 2, &kw(&["match"]), MatchMode::Or)
            .unwrap()
            .is_empty());
        assert_eq!(
            ids(&search_history_with_number(&conn, 3, &kw(&["match"]), MatchMode::Or).unwrap()),
            vec![2]
        );
    }
}
