//! Read-only access to the word database.
//!
//! The database holds a single `word(id, word, word_type, category)` table.
//! It is installed by `jrp download` and never written by this crate.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use crate::error::{Error, Result};

/// Position a word takes inside a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordType {
    Prefix,
    Middle,
    Suffix,
}

impl WordType {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Middle => "middle",
            Self::Suffix => "suffix",
        }
    }
}

impl std::fmt::Display for WordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(Self::Prefix),
            "middle" => Ok(Self::Middle),
            "suffix" => Ok(Self::Suffix),
            _ => Err(format!("unknown word type: {s}")),
        }
    }
}

/// Word category. Only `general` exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// An open, read-only handle on the word database.
pub struct WordSource {
    conn: Connection,
    path: PathBuf,
}

impl WordSource {
    /// Open the word database at `path`.
    ///
    /// Fails with [`Error::WordDbMissing`] when the file does not exist or has
    /// no `word` table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::word_db_missing(path));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // A non-SQLite file fails here with NOTADB; treat it like a missing schema.
        let has_table: bool = match conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'word')",
            [],
            |row| row.get(0),
        ) {
            Ok(found) => found,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::NotADatabase =>
            {
                false
            }
            Err(e) => return Err(e.into()),
        };
        if !has_table {
            return Err(Error::word_db_missing(path));
        }

        tracing::debug!(path = %path.display(), "word database opened");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All words of `word_type` in `category`, in rowid order.
    pub fn list(&self, word_type: WordType, category: Category) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT word FROM word WHERE word_type = ?1 AND category = ?2 ORDER BY id",
        )?;
        let words = stmt
            .query_map(params![word_type.as_str(), category.as_str()], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    /// Release the handle. Dropping the source has the same effect; this
    /// variant reports close errors.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::from(e))
    }
}
