//! SQL schema for the Canvass SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS items (
    id            INTEGER PRIMARY KEY,  -- externally assigned
    text          TEXT NOT NULL,
    label         TEXT NOT NULL DEFAULT 'unknown',
    status        TEXT NOT NULL DEFAULT 'unclassified',
    language      TEXT NOT NULL DEFAULT 'unknown',
    classified_by TEXT                  -- NULL until a classification wins
);

CREATE TABLE IF NOT EXISTS participants (
    identity   TEXT PRIMARY KEY,
    is_active  INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL            -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS items_status_idx ON items(status);

PRAGMA user_version = 1;
";
