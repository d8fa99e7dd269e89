use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Durable local key-value store. Each slot holds one whole serialized blob;
/// callers always read-modify-write the full value, never parts of it.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // WAL keeps readers from blocking the writer
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::with_connection(conn)
    }

    /// In-memory store, mostly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        log::info!("key-value store ready");

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Read the blob stored under `key`. Absence is `Ok(None)`, never an error.
    pub fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Replace the blob stored under `key` with `value`.
    pub fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?, ?, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            [key, value],
        )?;
        Ok(())
    }

    /// Drop the slot entirely. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        db.save("slot", "payload").unwrap();
        assert_eq!(db.load("slot").unwrap(), Some("payload".to_string()));
    }

    #[test]
    fn test_load_absent_key() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.save("slot", "first").unwrap();
        db.save("slot", "second").unwrap();
        assert_eq!(db.load("slot").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.save("slot", "payload").unwrap();
        db.remove("slot").unwrap();
        db.remove("slot").unwrap();
        assert_eq!(db.load("slot").unwrap(), None);
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalpe.db");

        {
            let db = Database::open(&path).unwrap();
            db.save("slot", "survives").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.load("slot").unwrap(), Some("survives".to_string()));
    }
}
