//! Storage repository traits
//!
//! The room store is a whole-document key-value contract: operations read a
//! Room, mutate an in-memory copy, and write it back wholesale. There is no
//! transactionality across get/put; concurrent writers to the same room are
//! last-writer-wins. A versioned compare-and-swap would slot in here.

use crate::error::Result;
use crate::models::Room;

/// Room store operations, keyed by room code
///
/// Implementations may be backed by SQLite, memory, or a network store.
/// Codes are stored exactly as given; callers upper-case before querying.
pub trait RoomStore {
    /// Fetch a room document, `None` if the code is unknown
    fn get(&self, code: &str) -> Result<Option<Room>>;

    /// Write a room document, replacing any existing one
    fn put(&self, code: &str, room: &Room) -> Result<()>;

    /// Check whether a code is in use
    fn exists(&self, code: &str) -> Result<bool>;

    /// Delete a room; returns whether anything was removed
    fn delete(&self, code: &str) -> Result<bool>;
}
