pub mod schema;

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::paths;

/// Open (or create) the user store at the given path with the schema
/// initialized. The caller owns the only writer handle until it is dropped.
pub fn open_store(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let created = !path.exists();

    paths::ensure_dir(path)?;

    let conn = Connection::open(path)?;
    configure(&conn)?;
    schema::init_schema(&conn)?;

    if created {
        tracing::info!(path = %path.display(), "store created");
    } else {
        tracing::debug!(path = %path.display(), "store opened");
    }
    Ok(conn)
}

/// Open an existing store for reading. Returns `None` when the file does not
/// exist, so read paths never create it.
pub fn open_store_if_exists(path: impl AsRef<Path>) -> Result<Option<Connection>> {
    let path = path.as_ref();
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "store absent, nothing to read");
        return Ok(None);
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure(&conn)?;
    schema::init_schema(&conn)?;
    Ok(Some(conn))
}

/// Open an in-memory store with the schema applied.
pub fn open_memory_store() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    schema::init_schema(&conn)?;
    Ok(conn)
}

/// Foreign keys on; a locked store fails immediately instead of retrying.
fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::ZERO)?;
    conn.pragma_update(None, "foreign_keys", "ON")
}
