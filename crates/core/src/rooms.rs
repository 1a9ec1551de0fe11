//! Room lifecycle manager
//!
//! Admits participants, records selections, and tracks submission
//! completeness. Every operation is a read-modify-write against the room
//! store: fetch the document, mutate a copy, write it back wholesale.

use rand::Rng;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::extract::ReceiptExtractor;
use crate::invariants;
use crate::models::{Charges, Receipt, ReceiptItem, Room};
use crate::storage::RoomStore;

/// Room codes are 6 characters from [A-Z0-9]
pub const CODE_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_CODE_ATTEMPTS: u32 = 32;

/// Generate a random room code
pub fn generate_room_code(rng: &mut impl Rng) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Progress snapshot for a room's waiting screen
#[derive(Debug, Clone, Serialize)]
pub struct RoomStatus {
    pub users: Vec<String>,
    pub submitted_users: Vec<String>,
    pub host_name: String,
    pub total_users: usize,
    pub expected_people: u32,
    pub submitted_count: usize,
    pub enough_users_joined: bool,
    pub all_submitted: bool,
    pub ready_to_proceed: bool,
}

/// Orchestrates room state over a [`RoomStore`]
pub struct RoomManager<S: RoomStore> {
    store: S,
}

impl<S: RoomStore> RoomManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a room seeded from an already-extracted receipt.
    ///
    /// Generates a fresh code, retrying on collision against the store.
    #[instrument(skip(self, receipt), fields(host = %host_name))]
    pub fn create_room(
        &self,
        host_name: &str,
        room_name: &str,
        num_people: u32,
        receipt: Receipt,
    ) -> Result<(String, Room)> {
        let code = self.fresh_code()?;
        let room = Room::new(host_name, room_name, num_people, receipt);
        invariants::assert_room_invariants(&room);

        self.store.put(&code, &room)?;
        info!(code = %code, room_name = %room.room_name, "Created room");
        Ok((code, room))
    }

    /// Create a room from a receipt image via the extractor collaborator.
    ///
    /// The extractor is called exactly once; its failure aborts creation.
    #[instrument(skip(self, extractor, image), fields(host = %host_name, image_len = image.len()))]
    pub fn create_room_from_image<E: ReceiptExtractor>(
        &self,
        host_name: &str,
        room_name: &str,
        num_people: u32,
        extractor: &E,
        image: &[u8],
    ) -> Result<(String, Room)> {
        let receipt = extractor.extract(image)?;
        self.create_room(host_name, room_name, num_people, receipt)
    }

    /// Overwrite the room's items and charges (host edit window).
    ///
    /// Idempotent; nothing guards against edits after submissions begin.
    #[instrument(skip(self, items, charges))]
    pub fn edit_items(
        &self,
        code: &str,
        items: Vec<ReceiptItem>,
        charges: Charges,
    ) -> Result<Room> {
        let code = normalize_code(code);
        let mut room = self.fetch(&code)?;

        room.items = items;
        room.charges = charges;

        self.store.put(&code, &room)?;
        info!(code = %code, items = room.items.len(), "Updated items and charges");
        Ok(room)
    }

    /// Add a participant to the room
    #[instrument(skip(self))]
    pub fn join_room(&self, code: &str, user_name: &str) -> Result<Room> {
        let code = normalize_code(code);
        let mut room = self.fetch(&code)?;

        // Names are exact, case-sensitive strings; no normalization here
        if room.has_user(user_name) {
            return Err(Error::AlreadyJoined(user_name.to_string()));
        }
        if room.is_full() {
            return Err(Error::RoomFull {
                capacity: room.num_people,
            });
        }

        room.users.push(user_name.to_string());
        invariants::assert_room_invariants(&room);

        self.store.put(&code, &room)?;
        info!(code = %code, user = %user_name, "User joined room");
        Ok(room)
    }

    /// Record a participant's final selection.
    ///
    /// Resubmission is silently ignored: the prior selection stands and no
    /// error is raised. Item names are not validated against the current
    /// items; the allocation engine tolerates dangling references.
    #[instrument(skip(self, item_names))]
    pub fn submit_selection(
        &self,
        code: &str,
        user_name: &str,
        item_names: Vec<String>,
    ) -> Result<Room> {
        let code = normalize_code(code);
        let mut room = self.fetch(&code)?;

        if room.has_submitted(user_name) {
            warn!(code = %code, user = %user_name, "Ignoring resubmission");
            return Ok(room);
        }

        invariants::assert_selection_writer(&room, user_name);
        room.selections
            .insert(user_name.to_string(), item_names);
        room.submitted_users.insert(user_name.to_string());
        invariants::assert_room_invariants(&room);

        self.store.put(&code, &room)?;
        info!(code = %code, user = %user_name, "Selection submitted");
        Ok(room)
    }

    /// Host-only: finalize every straggler with an empty selection.
    ///
    /// Monotonic and idempotent; re-invoking after full completion changes
    /// nothing.
    #[instrument(skip(self))]
    pub fn force_complete(&self, code: &str, requester: &str) -> Result<Room> {
        let code = normalize_code(code);
        let mut room = self.fetch(&code)?;

        if !room.is_host(requester) {
            return Err(Error::Forbidden);
        }

        let mut forced = 0;
        for user in room.users.clone() {
            if !room.has_submitted(&user) {
                room.selections.insert(user.clone(), Vec::new());
                room.submitted_users.insert(user);
                forced += 1;
            }
        }
        invariants::assert_room_invariants(&room);

        self.store.put(&code, &room)?;
        info!(code = %code, forced, "Host forced completion");
        Ok(room)
    }

    /// Progress snapshot for the waiting screen
    #[instrument(skip(self))]
    pub fn status(&self, code: &str) -> Result<RoomStatus> {
        let code = normalize_code(code);
        let room = self.fetch(&code)?;

        let total_users = room.users.len();
        let submitted_count = room.submitted_users.len();
        let enough_users_joined = total_users >= room.num_people as usize;
        let all_submitted = room.all_submitted();

        let mut submitted_users: Vec<String> = room.submitted_users.iter().cloned().collect();
        submitted_users.sort();

        Ok(RoomStatus {
            users: room.users,
            submitted_users,
            host_name: room.host_name,
            total_users,
            expected_people: room.num_people,
            submitted_count,
            enough_users_joined,
            all_submitted,
            ready_to_proceed: enough_users_joined && all_submitted,
        })
    }

    /// Fetch a room, erroring on unknown codes
    pub fn room(&self, code: &str) -> Result<Room> {
        self.fetch(&normalize_code(code))
    }

    /// Delete a room; returns whether it existed
    #[instrument(skip(self))]
    pub fn delete_room(&self, code: &str) -> Result<bool> {
        let code = normalize_code(code);
        let removed = self.store.delete(&code)?;
        if removed {
            info!(code = %code, "Deleted room");
        }
        Ok(removed)
    }

    fn fetch(&self, code: &str) -> Result<Room> {
        self.store
            .get(code)?
            .ok_or_else(|| Error::NotFound(code.to_string()))
    }

    fn fresh_code(&self) -> Result<String> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_room_code(&mut rng);
            if !self.store.exists(&code)? {
                return Ok(code);
            }
            warn!(code = %code, "Room code collision, retrying");
        }
        Err(Error::CodeSpaceExhausted)
    }
}

/// Codes are case-insensitive at lookup; stored form is uppercase
fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
