//! SQLite storage layer for Splitroom

mod memory;
mod migrations;
mod rooms;
mod traits;

use std::path::Path;

use rusqlite::Connection;
use tracing::instrument;

use crate::error::Result;
use crate::models::Room;

pub use memory::MemoryStore;
pub use rooms::RoomDocStore;
pub use traits::RoomStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get the room document store
    pub fn rooms(&self) -> RoomDocStore<'_> {
        RoomDocStore::new(&self.conn)
    }
}

// Implement the store trait for Database so the lifecycle manager can run
// over SQLite or a mock interchangeably

impl RoomStore for Database {
    fn get(&self, code: &str) -> Result<Option<Room>> {
        self.rooms().get(code)
    }

    fn put(&self, code: &str, room: &Room) -> Result<()> {
        self.rooms().put(code, room)
    }

    fn exists(&self, code: &str) -> Result<bool> {
        self.rooms().exists(code)
    }

    fn delete(&self, code: &str) -> Result<bool> {
        self.rooms().delete(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Receipt, ReceiptItem, Room};

    fn make_room() -> Room {
        let mut receipt = Receipt::empty();
        receipt.items.push(ReceiptItem::new("Tea", "₹20.00"));
        receipt.charges.total = "₹20.00".into();
        Room::new("Alice", "Dinner", 3, receipt)
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version(), 1);
    }

    #[test]
    fn test_document_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let mut room = make_room();
        room.users.push("Bob".into());
        room.selections.insert("Bob".into(), vec!["Tea".into()]);
        room.submitted_users.insert("Bob".into());

        db.put("XK93PQ", &room).unwrap();
        let loaded = db.get("XK93PQ").unwrap().unwrap();

        assert_eq!(loaded.users, vec!["Alice", "Bob"]);
        assert_eq!(loaded.selections["Bob"], vec!["Tea"]);
        assert!(loaded.submitted_users.contains("Bob"));
        assert_eq!(loaded.charges.total, "₹20.00");
    }

    #[test]
    fn test_put_overwrites() {
        let db = Database::open_in_memory().unwrap();
        let mut room = make_room();

        db.put("XK93PQ", &room).unwrap();
        room.users.push("Bob".into());
        db.put("XK93PQ", &room).unwrap();

        let loaded = db.get("XK93PQ").unwrap().unwrap();
        assert_eq!(loaded.users.len(), 2);
    }

    #[test]
    fn test_exists_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let room = make_room();

        assert!(!db.exists("XK93PQ").unwrap());
        db.put("XK93PQ", &room).unwrap();
        assert!(db.exists("XK93PQ").unwrap());
        assert!(db.delete("XK93PQ").unwrap());
        assert!(!db.exists("XK93PQ").unwrap());
        assert!(!db.delete("XK93PQ").unwrap());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rooms.db");

        {
            let db = Database::open(&path).unwrap();
            db.put("XK93PQ", &make_room()).unwrap();
        }

        let db = Database::open(&path).unwrap();
        let loaded = db.get("XK93PQ").unwrap().unwrap();
        assert_eq!(loaded.host_name, "Alice");
    }
}
