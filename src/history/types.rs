//! Row and outcome types for the history and favorite tables.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use crate::error::Error;
use crate::generator::GeneratedPhrase;

/// A phrase about to be inserted into history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistory {
    pub phrase: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl NewHistory {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            prefix: None,
            suffix: None,
        }
    }

    pub fn with_parts(
        phrase: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            prefix: Some(prefix.into()),
            suffix: Some(suffix.into()),
        }
    }
}

impl From<GeneratedPhrase> for NewHistory {
    fn from(p: GeneratedPhrase) -> Self {
        Self {
            phrase: p.phrase,
            prefix: Some(p.prefix),
            suffix: Some(p.suffix),
        }
    }
}

/// A row of the `history` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Assigned by the store; strictly increasing.
    pub id: i64,
    pub phrase: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Mirrors the existence of a `favorite` row with the same id.
    pub is_favorited: bool,
    pub created_at: DateTime<Utc>,
    /// Bumped on favorite toggles.
    pub updated_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Map a row selected with [`super::HISTORY_COLUMNS`], starting at column `offset`.
    pub(crate) fn from_row_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        let created_raw: String = row.get(offset + 5)?;
        let updated_raw: String = row.get(offset + 6)?;
        Ok(Self {
            id: row.get(offset)?,
            phrase: row.get(offset + 1)?,
            prefix: row.get(offset + 2)?,
            suffix: row.get(offset + 3)?,
            is_favorited: row.get::<_, i64>(offset + 4)? != 0,
            created_at: super::decode_ts(offset + 5, &created_raw)?,
            updated_at: super::decode_ts(offset + 6, &updated_raw)?,
        })
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }
}

impl AsRef<HistoryEntry> for HistoryEntry {
    fn as_ref(&self) -> &HistoryEntry {
        self
    }
}

/// A `favorite` row joined with the history row it promotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub history: HistoryEntry,
    /// When the row was promoted.
    pub favorited_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn id(&self) -> i64 {
        self.history.id
    }

    /// Map a row of `HISTORY_COLUMNS` followed by the favorite's `created_at`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let history = HistoryEntry::from_row_at(row, 0)?;
        let favorited: String = row.get(7)?;
        Ok(Self {
            history,
            favorited_at: super::decode_ts(7, &favorited)?,
        })
    }
}

impl AsRef<HistoryEntry> for FavoriteEntry {
    fn as_ref(&self) -> &HistoryEntry {
        &self.history
    }
}

/// How keywords combine in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The phrase contains every keyword.
    And,
    /// The phrase contains at least one keyword.
    #[default]
    Or,
}

impl MatchMode {
    pub fn from_and_flag(and: bool) -> Self {
        if and {
            Self::And
        } else {
            Self::Or
        }
    }
}

/// Whether history removal may delete favorited rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protection {
    /// Favorited rows are kept and count as misses.
    #[default]
    KeepFavorites,
    /// Favorited rows are deleted together with their favorite rows.
    Force,
}

impl Protection {
    pub fn from_force_flag(force: bool) -> Self {
        if force {
            Self::Force
        } else {
            Self::KeepFavorites
        }
    }
}

/// Outcome of a selective or bulk removal.
///
/// Only [`RemoveStatus::RemovedFailed`] is an error; the other three are
/// reported outcomes.
#[derive(Debug)]
pub enum RemoveStatus {
    /// Every requested row existed and was removed.
    RemovedSuccessfully,
    /// Some requested rows were removed, others were unknown or protected.
    RemovedNotAll,
    /// Nothing was removed.
    RemovedNone,
    /// The store faulted; it was left unchanged.
    RemovedFailed(Error),
}

impl RemoveStatus {
    /// Map requested/removed counts onto a status.
    pub fn from_counts(requested: usize, removed: usize) -> Self {
        if removed == 0 {
            Self::RemovedNone
        } else if removed >= requested {
            Self::RemovedSuccessfully
        } else {
            Self::RemovedNotAll
        }
    }

    /// Fold a fallible removal into a status.
    pub fn from_result(result: crate::error::Result<RemoveStatus>) -> Self {
        result.unwrap_or_else(Self::RemovedFailed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::RemovedFailed(_))
    }

    /// Stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemovedSuccessfully => "removed-successfully",
            Self::RemovedNotAll => "removed-not-all",
            Self::RemovedNone => "removed-none",
            Self::RemovedFailed(_) => "removed-failed",
        }
    }
}

impl std::fmt::Display for RemoveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
