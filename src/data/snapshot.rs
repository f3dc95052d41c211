//! Snapshot store: one wire blob per record kind (key-value store)

use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

use crate::data::models::RecordKind;

/// Data access object for persisted collection snapshots.
///
/// Each record kind is stored as a single text blob under a fixed key. The
/// registry never touches this store; the core moves blobs between the two.
#[derive(Clone)]
pub struct SnapshotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SnapshotStore {
    /// Create a new SnapshotStore
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Save a kind's blob (insert or update)
    pub fn save(&self, kind: RecordKind, blob: &str) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO snapshots (kind, body, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(kind) DO UPDATE SET body = ?2, updated_at = ?3",
            params![kind.storage_key(), blob, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Load a kind's blob, if one was ever saved
    pub fn load(&self, kind: RecordKind) -> SqliteResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT body FROM snapshots WHERE kind = ?1")?;
        let mut rows = stmt.query(params![kind.storage_key()])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }
}
