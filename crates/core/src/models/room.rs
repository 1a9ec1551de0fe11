//! Room model - a single bill-splitting session

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Charges, Receipt, ReceiptItem};

/// A Room is the aggregate root for one bill-splitting session.
///
/// `submitted_users` is a true set in memory; serde encodes it as a
/// sequence in the stored document and rebuilds the set on read, so the
/// storage layer never sees the distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Creator's display name; always present in `users`, always first
    pub host_name: String,
    pub room_name: String,
    /// Expected participant count; `users` never grows past this
    pub num_people: u32,
    /// Current line items (host-editable until the session is finalized)
    pub items: Vec<ReceiptItem>,
    /// Current charge fields (same edit window as `items`)
    pub charges: Charges,
    /// Joined display names, insertion-ordered, host first
    pub users: Vec<String>,
    /// user name -> item names that user claims
    pub selections: HashMap<String, Vec<String>>,
    /// Users whose selection is final
    pub submitted_users: HashSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a room seeded from an extracted receipt
    pub fn new(
        host_name: impl Into<String>,
        room_name: impl Into<String>,
        num_people: u32,
        receipt: Receipt,
    ) -> Self {
        let host_name = host_name.into();
        Self {
            users: vec![host_name.clone()],
            host_name,
            room_name: room_name.into(),
            num_people,
            items: receipt.items,
            charges: receipt.charges,
            selections: HashMap::new(),
            submitted_users: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_host(&self, user_name: &str) -> bool {
        self.host_name == user_name
    }

    pub fn has_user(&self, user_name: &str) -> bool {
        self.users.iter().any(|u| u == user_name)
    }

    pub fn is_full(&self) -> bool {
        self.users.len() >= self.num_people as usize
    }

    pub fn has_submitted(&self, user_name: &str) -> bool {
        self.submitted_users.contains(user_name)
    }

    /// True once every joined user has submitted (and somebody joined)
    pub fn all_submitted(&self) -> bool {
        !self.users.is_empty() && self.submitted_users.len() == self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_room() -> Room {
        let mut receipt = Receipt::empty();
        receipt.items.push(ReceiptItem::new("Tea", "₹20.00"));
        Room::new("Alice", "Dinner", 3, receipt)
    }

    #[test]
    fn test_new_room_has_host_first() {
        let room = make_room();
        assert_eq!(room.users, vec!["Alice"]);
        assert!(room.is_host("Alice"));
        assert!(!room.is_host("alice"));
        assert!(room.selections.is_empty());
        assert!(room.submitted_users.is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut room = make_room();
        assert!(!room.is_full());
        room.users.push("Bob".into());
        room.users.push("Carol".into());
        assert!(room.is_full());
    }

    #[test]
    fn test_submitted_set_round_trips_as_list() {
        let mut room = make_room();
        room.submitted_users.insert("Alice".into());
        room.submitted_users.insert("Bob".into());

        let json = serde_json::to_string(&room).unwrap();
        let back: Room = serde_json::from_str(&json).unwrap();
        assert_eq!(back.submitted_users, room.submitted_users);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["submitted_users"].is_array());
    }

    #[test]
    fn test_all_submitted_requires_users() {
        let mut room = make_room();
        assert!(!room.all_submitted());
        room.submitted_users.insert("Alice".into());
        assert!(room.all_submitted());
    }
}
