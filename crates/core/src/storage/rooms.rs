//! Room document storage operations

use rusqlite::{params, Connection};
use tracing::instrument;

use crate::error::Result;
use crate::models::Room;

/// SQLite-backed room document store
///
/// Each room is one row: the code and a JSON document. The set-valued
/// `submitted_users` field serializes as a list inside the document and is
/// rebuilt as a set on read by serde.
pub struct RoomDocStore<'a> {
    conn: &'a Connection,
}

impl<'a> RoomDocStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch a room by code
    #[instrument(skip(self))]
    pub fn get(&self, code: &str) -> Result<Option<Room>> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM rooms WHERE code = ?1")?;

        let document: Option<String> = match stmt.query_row(params![code], |row| row.get(0)) {
            Ok(doc) => Some(doc),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        match document {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    /// Write a room document, replacing any existing one
    #[instrument(skip(self, room), fields(room_name = %room.room_name))]
    pub fn put(&self, code: &str, room: &Room) -> Result<()> {
        let document = serde_json::to_string(room)?;
        self.conn.execute(
            "INSERT INTO rooms (code, document, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(code) DO UPDATE SET document = excluded.document",
            params![code, document, room.created_at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Check whether a room code is in use
    #[instrument(skip(self))]
    pub fn exists(&self, code: &str) -> Result<bool> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM rooms WHERE code = ?1",
            params![code],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Delete a room; returns whether a row was removed
    #[instrument(skip(self))]
    pub fn delete(&self, code: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM rooms WHERE code = ?1", params![code])?;
        Ok(removed > 0)
    }
}
