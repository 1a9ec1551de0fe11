//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible room states during development.
//! These checks are compiled out in release builds.

use crate::models::Room;

/// Validate that a Room's state is internally consistent
pub fn assert_room_invariants(room: &Room) {
    // Host is always present and always first
    debug_assert!(
        room.users.first().map(String::as_str) == Some(room.host_name.as_str()),
        "Room '{}' does not list host '{}' first: {:?}",
        room.room_name,
        room.host_name,
        room.users
    );

    // Display names are unique, case-sensitive
    for (i, user) in room.users.iter().enumerate() {
        debug_assert!(
            !room.users[i + 1..].contains(user),
            "Room '{}' has duplicate user '{}'",
            room.room_name,
            user
        );
    }

    // Capacity bound
    debug_assert!(
        room.users.len() <= room.num_people as usize,
        "Room '{}' has {} users but capacity {}",
        room.room_name,
        room.users.len(),
        room.num_people
    );

    debug_assert!(
        room.num_people > 0,
        "Room '{}' has zero capacity",
        room.room_name
    );

    // Submitted users are all members
    for user in &room.submitted_users {
        debug_assert!(
            room.has_user(user),
            "Room '{}' marks non-member '{}' as submitted",
            room.room_name,
            user
        );
    }
}

/// Validate that a selection is being written for a current member
pub fn assert_selection_writer(room: &Room, user_name: &str) {
    debug_assert!(
        room.has_user(user_name),
        "Selection write for non-member '{}' in room '{}'",
        user_name,
        room.room_name
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Receipt;

    fn make_room() -> Room {
        Room::new("Alice", "Dinner", 3, Receipt::empty())
    }

    #[test]
    fn test_valid_room() {
        let mut room = make_room();
        room.users.push("Bob".into());
        room.submitted_users.insert("Bob".into());
        assert_room_invariants(&room);
    }

    #[test]
    #[should_panic(expected = "duplicate user")]
    fn test_duplicate_user_detected() {
        let mut room = make_room();
        room.users.push("Alice".into());
        assert_room_invariants(&room);
    }

    #[test]
    #[should_panic(expected = "non-member")]
    fn test_phantom_submitter_detected() {
        let mut room = make_room();
        room.submitted_users.insert("Mallory".into());
        assert_room_invariants(&room);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn test_over_capacity_detected() {
        let mut room = make_room();
        room.num_people = 1;
        room.users.push("Bob".into());
        assert_room_invariants(&room);
    }
}
