//! Habit Ledger - daily habits with streaks, points and achievements
//!
//! The [`HabitLedger`] owns a collection of habits and a single user
//! profile. Marking a habit done for a day updates its streak, awards
//! points, recomputes the user's level and unlocks achievements. The whole
//! ledger is written through a pluggable [`storage::StateStore`] after
//! every change.
//!
//! ## Storage
//!
//! - [`storage::JsonFileStore`]: one JSON file (default)
//! - [`storage::SqliteStore`]: a key-value table in SQLite
//! - [`storage::MemoryStore`]: in-process, for tests

pub mod config;
pub mod domain;
pub mod ledger;
pub mod storage;

pub use domain::*;
pub use ledger::{
    format_date, parse_date, Clock, FixedClock, HabitLedger, HabitStats, LedgerError,
    LedgerEvent, LedgerOverview, SystemClock, ToggleOutcome,
};
