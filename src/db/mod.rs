//! Database layer (SQLite).

pub mod codec;
pub mod sqlite;

pub use sqlite::ActivityStore;

use sha2::{Digest, Sha256};

/// Table names as constants.
pub mod tables {
    pub const ACTIVITIES: &str = "activities";
}

/// Hex-encoded SHA-256 of the raw recording bytes, used as the dedup key.
pub fn content_digest(raw: &[u8]) -> String {
    hex::encode(Sha256::digest(raw))
}
