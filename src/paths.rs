//! Locations of the word database and the user store.
//!
//! Both files live under `<user-data-dir>/jrp/`. `<user-data-dir>` is
//! `$XDG_DATA_HOME` when set, otherwise `<home>/.local/share`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory under `<user-data-dir>` that holds both databases.
pub const APP_DIR: &str = "jrp";
/// Read-only word source file name.
pub const WORD_DB_FILE: &str = "word.db";
/// User store file name.
pub const STORE_FILE: &str = "jrp.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JrpPaths {
    data_dir: PathBuf,
}

impl JrpPaths {
    /// Use `data_dir` as `<user-data-dir>`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve `<user-data-dir>` from the process environment.
    pub fn from_env() -> Self {
        Self::new(resolve_data_dir(
            std::env::var_os("XDG_DATA_HOME"),
            dirs::home_dir(),
        ))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `<user-data-dir>/jrp`
    pub fn app_dir(&self) -> PathBuf {
        self.data_dir.join(APP_DIR)
    }

    /// `<user-data-dir>/jrp/word.db`
    pub fn word_db_path(&self) -> PathBuf {
        self.app_dir().join(WORD_DB_FILE)
    }

    /// `<user-data-dir>/jrp/jrp.db`
    pub fn store_path(&self) -> PathBuf {
        self.app_dir().join(STORE_FILE)
    }
}

/// Pick `<user-data-dir>` from an optional `XDG_DATA_HOME` value and the home
/// directory. An empty `XDG_DATA_HOME` counts as unset.
pub fn resolve_data_dir(xdg_data_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match xdg_data_home {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share"),
    }
}

/// Create every missing parent directory of `path`. New directories are
/// created with mode 0700 on Unix.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(parent)?;
    tracing::debug!(dir = %parent.display(), "created data directory");
    Ok(())
}
