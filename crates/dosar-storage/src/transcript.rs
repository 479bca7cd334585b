//! The durable transcript store.
//!
//! One append-only SQLite table keyed by session id. Connections are
//! short-lived: every operation opens a handle, runs a single statement,
//! and drops it — no pool, no transaction spanning operations. Each
//! append is one atomic `INSERT`, so a failed append cannot corrupt
//! rows that are already durable.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, info};

use dosar_core::models::{ChatMessage, ChatRole, SessionId};

use crate::error::StorageError;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS history (
    session_id TEXT NOT NULL,
    role       TEXT NOT NULL,
    content    TEXT NOT NULL,
    timestamp  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_history_session
    ON history (session_id, timestamp);
";

/// SQLite-backed message log. The store holds only the database
/// location; every operation opens its own connection.
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Open (creating if necessary) the transcript database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = TranscriptStore {
            path: path.as_ref().to_path_buf(),
        };
        store.connect()?.execute_batch(SCHEMA)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Durably record one message with a fresh timestamp.
    ///
    /// Timestamps are stored as integer microseconds; same-microsecond
    /// appends keep insertion order via the rowid tiebreak in [`load`].
    pub fn append(
        &self,
        session_id: SessionId,
        role: ChatRole,
        content: &str,
    ) -> Result<(), StorageError> {
        let timestamp = jiff::Timestamp::now();
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO history (session_id, role, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![
                session_id.to_string(),
                role.as_str(),
                content,
                timestamp.as_microsecond()
            ],
        )?;
        debug!(%session_id, role = role.as_str(), len = content.len(), "message appended");
        Ok(())
    }

    /// All messages for a session in ascending timestamp order.
    ///
    /// An unknown session yields an empty vec, not an error.
    pub fn load(&self, session_id: SessionId) -> Result<Vec<ChatMessage>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT role, content, timestamp FROM history
             WHERE session_id = ?1
             ORDER BY timestamp ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![session_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut messages = Vec::new();
        for row in rows {
            let (role, content, micros) = row?;
            let role = ChatRole::parse(&role)
                .ok_or_else(|| StorageError::CorruptRow(format!("unknown role: {role}")))?;
            let timestamp = jiff::Timestamp::from_microsecond(micros)
                .map_err(|e| StorageError::CorruptRow(e.to_string()))?;
            messages.push(ChatMessage {
                role,
                content,
                timestamp,
            });
        }
        Ok(messages)
    }

    /// Delete all messages for a session. Idempotent: clearing an empty
    /// or unknown session succeeds silently.
    pub fn clear(&self, session_id: SessionId) -> Result<(), StorageError> {
        let conn = self.connect()?;
        let deleted = conn.execute(
            "DELETE FROM history WHERE session_id = ?1",
            params![session_id.to_string()],
        )?;
        info!(%session_id, deleted, "transcript cleared");
        Ok(())
    }

    /// Number of messages recorded for a session.
    pub fn message_count(&self, session_id: SessionId) -> Result<u64, StorageError> {
        let conn = self.connect()?;
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM history WHERE session_id = ?1",
            params![session_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
