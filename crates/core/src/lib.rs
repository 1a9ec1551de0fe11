//! Splitroom Core Library
//!
//! Room lifecycle, bill-split allocation, and storage for the Splitroom
//! bill-splitting service.

pub mod amount;
pub mod error;
pub mod extract;
pub mod invariants;
pub mod models;
pub mod rooms;
pub mod split;
pub mod storage;

pub use amount::{parse_amount, round2};
pub use error::{Error, Result};
pub use extract::{ApiKeyPool, FixtureExtractor, ReceiptExtractor};
pub use models::{Charges, Receipt, ReceiptItem, Room};
pub use rooms::{generate_room_code, RoomManager, RoomStatus, CODE_LEN};
pub use split::{split_bill, BillSplit, Totals, UserShare};
pub use storage::{Database, MemoryStore, RoomDocStore, RoomStore};
