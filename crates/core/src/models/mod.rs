//! Core data models

mod receipt;
mod room;

pub use receipt::{Charges, Receipt, ReceiptItem};
pub use room::Room;
