//! SQLite-backed preference store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{AppRateError, AppRateResult, ErrorCode};
use crate::traits::PreferenceStore;

/// Default namespace for preference rows.
pub const DEFAULT_NAMESPACE: &str = "apprate";

/// Preference store persisted in a SQLite table.
///
/// Every write runs as its own autocommit statement, so a value is on disk
/// as soon as the call returns. Rows are scoped by namespace; `clear` only
/// touches the store's own namespace.
pub struct SqlitePreferenceStore {
    conn: Mutex<Connection>,
    namespace: String,
}

impl SqlitePreferenceStore {
    /// Open (or create) a store at the given path.
    pub fn new(path: impl AsRef<Path>) -> AppRateResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path.as_ref()).map_err(|e| AppRateError::Storage {
            message: format!("Failed to open {}: {}", path.as_ref().display(), e),
            code: ErrorCode::StoreOpenFailed,
            source: Some(Box::new(e)),
        })?;
        Self::with_connection(conn)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> AppRateResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> AppRateResult<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            namespace: DEFAULT_NAMESPACE.to_string(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Scope this store to another namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn init_schema(&self) -> AppRateResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value INTEGER NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (namespace, key)
            );
        "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> AppRateResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppRateError::internal("preference connection lock poisoned"))
    }

    fn get(&self, key: &str) -> AppRateResult<Option<i64>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
            params![self.namespace, key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| AppRateError::Storage {
            message: format!("Failed to read '{}': {}", key, e),
            code: ErrorCode::StoreReadFailed,
            source: Some(Box::new(e)),
        })
    }

    fn put(&self, key: &str, value: i64) -> AppRateResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO preferences (namespace, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(namespace, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![self.namespace, key, value],
        )?;
        Ok(())
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get_i64(&self, key: &str, default: i64) -> AppRateResult<i64> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    fn put_i64(&self, key: &str, value: i64) -> AppRateResult<()> {
        self.put(key, value)
    }

    fn get_bool(&self, key: &str, default: bool) -> AppRateResult<bool> {
        Ok(self.get(key)?.map_or(default, |v| v != 0))
    }

    fn put_bool(&self, key: &str, value: bool) -> AppRateResult<()> {
        self.put(key, i64::from(value))
    }

    fn remove(&self, key: &str) -> AppRateResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM preferences WHERE namespace = ?1 AND key = ?2",
            params![self.namespace, key],
        )?;
        Ok(())
    }

    fn clear(&self) -> AppRateResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM preferences WHERE namespace = ?1",
            params![self.namespace],
        )?;
        Ok(())
    }
}
