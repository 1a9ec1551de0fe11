//! In-memory room store
//!
//! Fallback storage for when no database is available, and the test double
//! for everything above the storage layer. Not suitable for multi-process
//! deployments.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::models::Room;
use crate::storage::RoomStore;

#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<String, Room>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms currently held
    pub fn len(&self) -> usize {
        self.rooms.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RoomStore for MemoryStore {
    fn get(&self, code: &str) -> Result<Option<Room>> {
        let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rooms.get(code).cloned())
    }

    fn put(&self, code: &str, room: &Room) -> Result<()> {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        rooms.insert(code.to_string(), room.clone());
        Ok(())
    }

    fn exists(&self, code: &str) -> Result<bool> {
        let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rooms.contains_key(code))
    }

    fn delete(&self, code: &str) -> Result<bool> {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rooms.remove(code).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Receipt, Room};

    #[test]
    fn test_put_get_delete() {
        let store = MemoryStore::new();
        let room = Room::new("Alice", "Dinner", 2, Receipt::empty());

        assert!(!store.exists("AB12CD").unwrap());
        store.put("AB12CD", &room).unwrap();
        assert!(store.exists("AB12CD").unwrap());

        let loaded = store.get("AB12CD").unwrap().unwrap();
        assert_eq!(loaded.host_name, "Alice");

        assert!(store.delete("AB12CD").unwrap());
        assert!(!store.delete("AB12CD").unwrap());
        assert!(store.get("AB12CD").unwrap().is_none());
    }
}
