//! Key-value storage for the persisted selection snapshot.
//!
//! A tiny `StorageBackend` trait stores named JSON values. `SqliteStorage`
//! keeps them in a single `kv` table; `MemoryStorage` is a plain map used
//! in tests and when the database cannot be opened.

use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Key holding the JSON array of selected section ids.
pub const SELECTED_KEY: &str = "vku_timetable_selected";
/// Key holding whether the data-source notice was dismissed.
pub const NOTE_CLOSED_KEY: &str = "vku_data_note_closed";

pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    /// Must be durable when it returns `Ok`.
    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a file-backed database, creating the parent directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(dir) = path.as_ref().parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(SqliteStorage { conn })
    }
}

impl StorageBackend for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.conn
            .execute("REPLACE INTO kv (key, value) VALUES (?1, ?2)", params![key, json])?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Persist the ordered id list of the selection.
pub fn save_selection(store: &mut dyn StorageBackend, ids: &[&str]) -> Result<(), StoreError> {
    store.set(SELECTED_KEY, &Value::from(ids.to_vec()))
}

/// Read the saved id list. Missing, unreadable or mistyped snapshots give an
/// empty list; the catalog may have changed since it was written.
pub fn load_selection(store: &dyn StorageBackend) -> Vec<String> {
    match store.get(SELECTED_KEY) {
        Ok(Some(v)) => match serde_json::from_value::<Vec<String>>(v) {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "saved selection is not a list of ids, ignoring");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to read saved selection");
            Vec::new()
        }
    }
}

pub fn note_closed(store: &dyn StorageBackend) -> bool {
    matches!(store.get(NOTE_CLOSED_KEY), Ok(Some(Value::Bool(true))))
}

pub fn close_note(store: &mut dyn StorageBackend) -> Result<(), StoreError> {
    store.set(NOTE_CLOSED_KEY, &Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sqlite_round_trip_and_replace() {
        let mut store = SqliteStorage::open_in_memory().expect("sqlite");
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", &json!(["a", "b"])).unwrap();
        store.set("k", &json!(["c"])).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!(["c"])));
    }

    #[test]
    fn selection_helpers() {
        let mut store = MemoryStorage::new();
        assert!(load_selection(&store).is_empty());
        save_selection(&mut store, &["1001-1-1", "1002-1-2"]).unwrap();
        assert_eq!(load_selection(&store), vec!["1001-1-1", "1002-1-2"]);
        assert_eq!(store.get(SELECTED_KEY).unwrap(), Some(json!(["1001-1-1", "1002-1-2"])));
    }

    #[test]
    fn mistyped_snapshot_is_ignored() {
        let mut store = MemoryStorage::new();
        store.set(SELECTED_KEY, &json!({"not": "a list"})).unwrap();
        assert!(load_selection(&store).is_empty());
        store.set(SELECTED_KEY, &json!([1, 2])).unwrap();
        assert!(load_selection(&store).is_empty());
    }

    #[test]
    fn note_flag() {
        let mut store = SqliteStorage::open_in_memory().unwrap();
        assert!(!note_closed(&store));
        close_note(&mut store).unwrap();
        assert!(note_closed(&store));
    }
}
