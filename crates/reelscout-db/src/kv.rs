//! Key-value document storage backed by the `kv_store` table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// Whole-value key-value store.
///
/// Each key maps to one text document that is read and written as a unit.
#[derive(Debug)]
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Wraps a migrated connection.
    #[must_use]
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read key {key}"))
    }

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                rusqlite::params![key, value],
            )
            .with_context(|| format!("failed to write key {key}"))?;
        tracing::debug!(key, bytes = value.len(), "kv_store updated");
        Ok(())
    }

    /// Removes `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", rusqlite::params![key])
            .with_context(|| format!("failed to remove key {key}"))?;
        Ok(())
    }
}
