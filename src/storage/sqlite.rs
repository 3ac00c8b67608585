//! SQLite key-value store
//!
//! Keeps the ledger record in a one-table key-value database so it can sit
//! next to other application data.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use rusqlite::{Connection, OptionalExtension};

use super::{LedgerState, StateStore, STATE_KEY, UNREADABLE_SUFFIX};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create ledger dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open ledger db: {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "FULL")?;

        Self::with_connection(conn)
    }

    /// `<dir>/ledger.db`
    pub fn open_in_dir(dir: &Path) -> Result<Self> {
        Self::open(&dir.join("ledger.db"))
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory ledger db")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize ledger schema")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("Ledger DB lock poisoned"))
    }

    /// Store raw text under the ledger key, bypassing encoding
    pub fn put_raw(&self, value: &str) -> Result<()> {
        self.put(STATE_KEY, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()
            .with_context(|| format!("Failed to read '{}' record", key))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            (key, value, chrono::Utc::now().timestamp_millis()),
        )
        .with_context(|| format!("Failed to write '{}' record", key))?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        let raw = self.get(STATE_KEY)?;
        raw.as_deref().map(LedgerState::decode).transpose()
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let encoded = state.encode()?;
        self.put_raw(&encoded)
    }

    /// Copy the record to the `habitTracker.corrupt` key
    fn preserve_unreadable(&self) -> Result<()> {
        if let Some(raw) = self.get(STATE_KEY)? {
            let backup_key = format!("{}{}", STATE_KEY, UNREADABLE_SUFFIX);
            self.put(&backup_key, &raw)?;
            tracing::warn!("Unreadable ledger record copied to key '{}'", backup_key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use tempfile::tempdir;

    #[test]
    fn test_empty_db_loads_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_single_record() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut state = LedgerState {
            habits: Vec::new(),
            user: Some(User::default_profile("A", "a@example.com")),
        };
        store.save(&state).unwrap();

        if let Some(user) = state.user.as_mut() {
            user.total_points = 40;
        }
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), Some(state));
        let conn = store.conn().unwrap();
        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0)).unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_file_db_survives_reopen() {
        let dir = tempdir().unwrap();
        let state = LedgerState {
            habits: Vec::new(),
            user: Some(User::default_profile("B", "b@example.com")),
        };
        SqliteStore::open_in_dir(dir.path()).unwrap().save(&state).unwrap();

        let reopened = SqliteStore::open_in_dir(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(state));
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.put_raw("not json").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_preserve_unreadable_copies_record_to_backup_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.preserve_unreadable().unwrap();
        assert!(store.get("habitTracker.corrupt").unwrap().is_none());

        store.put_raw("not json").unwrap();
        store.preserve_unreadable().unwrap();
        store.save(&LedgerState::default()).unwrap();

        assert_eq!(store.get("habitTracker.corrupt").unwrap().as_deref(), Some("not json"));
        assert!(store.load().unwrap().is_some());
    }
}
