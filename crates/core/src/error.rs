//! Error types for Splitroom Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("User '{0}' has already joined this room")]
    AlreadyJoined(String),

    #[error("Room is full ({capacity} participants)")]
    RoomFull { capacity: u32 },

    #[error("Only the host can perform this action")]
    Forbidden,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Receipt extraction failed: {0}")]
    Extraction(String),

    #[error("Could not generate an unused room code")]
    CodeSpaceExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
