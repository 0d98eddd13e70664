//! Path-backed repositories.
//!
//! [`HistoryStore`] and [`FavoriteStore`] hold the store path and a clock.
//! Each operation opens its own connection and drops it before returning.
//! Reads against a missing store file return an empty list and do not create
//! the file; writes create it on demand.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::Connection;

use super::types::{FavoriteEntry, HistoryEntry, MatchMode, NewHistory, Protection, RemoveStatus};
use super::{favorite, query, remove, store};
use crate::db;
use crate::error::Result;

/// Source of "now" for `created_at` / `updated_at`.
pub type Clock = fn() -> DateTime<Utc>;

/// Wall-clock UTC time truncated to whole seconds.
pub fn system_clock() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub trait HistoryRepository {
    /// Insert `records` in order; returns the stored rows.
    fn save_history(&self, records: &[NewHistory]) -> Result<Vec<HistoryEntry>>;
    /// Insert `records` and favorite them in the same transaction.
    fn save_favorited_history(&self, records: &[NewHistory]) -> Result<Vec<HistoryEntry>>;
    fn get_all_history(&self) -> Result<Vec<HistoryEntry>>;
    fn get_history_with_number(&self, n: i64) -> Result<Vec<HistoryEntry>>;
    fn search_all_history(&self, keywords: &[String], mode: MatchMode) -> Result<Vec<HistoryEntry>>;
    fn search_history_with_number(
        &self,
        n: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> Result<Vec<HistoryEntry>>;
    fn remove_history_by_ids(&self, ids: &[i64], protection: Protection) -> RemoveStatus;
    fn remove_history_all(&self, protection: Protection) -> RemoveStatus;
}

pub trait FavoriteRepository {
    /// Promote history rows; returns how many were newly favorited.
    fn add_favorite_by_ids(&self, ids: &[i64]) -> Result<usize>;
    fn get_all_favorite(&self) -> Result<Vec<FavoriteEntry>>;
    fn get_favorite_with_number(&self, n: i64) -> Result<Vec<FavoriteEntry>>;
    fn search_all_favorite(&self, keywords: &[String], mode: MatchMode) -> Result<Vec<FavoriteEntry>>;
    fn search_favorite_with_number(
        &self,
        n: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> Result<Vec<FavoriteEntry>>;
    fn remove_favorite_by_ids(&self, ids: &[i64]) -> RemoveStatus;
    fn remove_favorite_all(&self) -> RemoveStatus;
}

/// Open a writer handle, creating the store if needed, and run `f` on it.
fn with_writer<T>(path: &Path, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
    let mut conn = db::open_store(path)?;
    f(&mut conn)
}

/// Run `f` against an existing store, or return `T::default()` when the file
/// is absent.
fn with_reader<T: Default>(path: &Path, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    match db::open_store_if_exists(path)? {
        Some(conn) => f(&conn),
        None => Ok(T::default()),
    }
}

/// History operations on the store at a fixed path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    clock: Clock,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, system_clock)
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }
}

impl HistoryRepository for HistoryStore {
    fn save_history(&self, records: &[NewHistory]) -> Result<Vec<HistoryEntry>> {
        let now = (self.clock)();
        with_writer(&self.path, |conn| store::save_history_entries(conn, records, now))
    }

    fn save_favorited_history(&self, records: &[NewHistory]) -> Result<Vec<HistoryEntry>> {
        let now = (self.clock)();
        with_writer(&self.path, |conn| store::save_favorited_entries(conn, records, now))
    }

    fn get_all_history(&self) -> Result<Vec<HistoryEntry>> {
        with_reader(&self.path, query::get_all_history)
    }

    fn get_history_with_number(&self, n: i64) -> Result<Vec<HistoryEntry>> {
        with_reader(&self.path, |conn| query::get_history_with_number(conn, n))
    }

    fn search_all_history(&self, keywords: &[String], mode: MatchMode) -> Result<Vec<HistoryEntry>> {
        with_reader(&self.path, |conn| query::search_all_history(conn, keywords, mode))
    }

    fn search_history_with_number(
        &self,
        n: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> Result<Vec<HistoryEntry>> {
        with_reader(&self.path, |conn| {
            query::search_history_with_number(conn, n, keywords, mode)
        })
    }

    fn remove_history_by_ids(&self, ids: &[i64], protection: Protection) -> RemoveStatus {
        RemoveStatus::from_result(with_writer(&self.path, |conn| {
            remove::remove_history_by_ids(conn, ids, protection)
        }))
    }

    fn remove_history_all(&self, protection: Protection) -> RemoveStatus {
        RemoveStatus::from_result(with_writer(&self.path, |conn| {
            remove::remove_history_all(conn, protection)
        }))
    }
}

/// Favorite operations on the store at a fixed path.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    path: PathBuf,
    clock: Clock,
}

impl FavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, system_clock)
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }
}

impl FavoriteRepository for FavoriteStore {
    fn add_favorite_by_ids(&self, ids: &[i64]) -> Result<usize> {
        let now = (self.clock)();
        with_writer(&self.path, |conn| favorite::add_favorite_by_ids(conn, ids, now))
    }

    fn get_all_favorite(&self) -> Result<Vec<FavoriteEntry>> {
        with_reader(&self.path, favorite::get_all_favorite)
    }

    fn get_favorite_with_number(&self, n: i64) -> Result<Vec<FavoriteEntry>> {
        with_reader(&self.path, |conn| favorite::get_favorite_with_number(conn, n))
    }

    fn search_all_favorite(&self, keywords: &[String], mode: MatchMode) -> Result<Vec<FavoriteEntry>> {
        with_reader(&self.path, |conn| favorite::search_all_favorite(conn, keywords, mode))
    }

    fn search_favorite_with_number(
        &self,
        n: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> Result<Vec<FavoriteEntry>> {
        with_reader(&self.path, |conn| {
            favorite::search_favorite_with_number(conn, n, keywords, mode)
        })
    }

    fn remove_favorite_by_ids(&self, ids: &[i64]) -> RemoveStatus {
        let now = (self.clock)();
        RemoveStatus::from_result(with_writer(&self.path, |conn| {
            favorite::remove_favorite_by_ids(conn, ids, now)
        }))
    }

    fn remove_favorite_all(&self) -> RemoveStatus {
        let now = (self.clock)();
        RemoveStatus::from_result(with_writer(&self.path, |conn| {
            favorite::remove_favorite_all(conn, now)
        }))
    }
}
