//! Error kinds surfaced by the core.
//!
//! Command handlers wrap these in `anyhow` with context naming the failing
//! operation; library code returns [`Result`] so callers can tell a missing
//! word database apart from a store fault.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The word database is absent or does not contain the `word` table.
    /// Recovery is `jrp download`.
    #[error("word database not found at {}; run `jrp download` first", path.display())]
    WordDbMissing { path: PathBuf },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised only by the downloader.
    #[error("download failed: {0}")]
    Download(String),
}

impl Error {
    pub fn word_db_missing(path: impl Into<PathBuf>) -> Self {
        Self::WordDbMissing { path: path.into() }
    }

    pub fn is_word_db_missing(&self) -> bool {
        matches!(self, Self::WordDbMissing { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
