//! SQL DDL for the user store.
//!
//! Defines the `history`, `favorite`, and `schema_meta` tables. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

/// The schema version written on first open.
pub const SCHEMA_VERSION: u32 = 1;

/// All schema DDL statements for the store.
const SCHEMA_SQL: &str = r#"
-- Every generated phrase. INTEGER PRIMARY KEY without AUTOINCREMENT: new ids
-- continue from the current maximum.
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY,
    phrase TEXT NOT NULL CHECK(length(phrase) > 0),
    prefix TEXT,
    suffix TEXT,
    is_favorited INTEGER NOT NULL DEFAULT 0 CHECK(is_favorited IN (0, 1)),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_history_created_at ON history(created_at);

-- Favorite marker, keyed by the history id it promotes
CREATE TABLE IF NOT EXISTS favorite (
    id INTEGER PRIMARY KEY REFERENCES history(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Get the schema version recorded in the store.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        [],
        |row| {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().unwrap_or(0))
        },
    )
}
