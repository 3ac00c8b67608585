//! Persistence backends for the ledger
//!
//! The whole ledger is one JSON record stored under a fixed key:
//!
//! ```text
//! {
//!   "habits": [ Habit, ... ],
//!   "user": User | null
//! }
//! ```
//!
//! Backends only move that record around. Deciding what to do with a
//! missing or unreadable record is up to the ledger.

mod atomic;
mod json;
mod memory;
mod sqlite;

pub(crate) use atomic::write_locked;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, User};

/// Key the ledger record is stored under
pub const STATE_KEY: &str = "habitTracker";

/// Appended to the file name or key an unreadable record is copied to
pub const UNREADABLE_SUFFIX: &str = ".corrupt";

/// The persisted ledger record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub user: Option<User>,
}

impl LedgerState {
    /// Encode as the JSON record
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize ledger state")
    }

    /// Decode the JSON record
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse ledger state JSON")
    }
}

/// Where the ledger record lives
///
/// `save` must be durable before it returns; the ledger calls it after
/// every mutation.
pub trait StateStore {
    /// Read the record. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<LedgerState>>;

    /// Replace the stored record
    fn save(&self, state: &LedgerState) -> Result<()>;

    /// Copy the stored record, as raw text, to a backup slot next to it.
    /// Called when `load` failed, before the record is overwritten.
    fn preserve_unreadable(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_null_user() {
        let state = LedgerState::decode(r#"{"habits": [], "user": null}"#).unwrap();
        assert!(state.habits.is_empty());
        assert!(state.user.is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(LedgerState::decode("{not json").is_err());
        assert!(LedgerState::decode(r#"{"habits": 5}"#).is_err());
    }

    #[test]
    fn test_encode_has_both_top_level_keys() {
        let raw = LedgerState::default().encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["habits"].is_array());
        assert!(value["user"].is_null());
    }
}
