//! Shared helpers for ledger integration tests

#![allow(dead_code)]

use std::path::Path;

use chrono::{Days, NaiveDate};
use habit_ledger::storage::{JsonFileStore, SqliteStore};
use habit_ledger::{FixedClock, HabitLedger};

/// The day every test treats as "today"
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 20).expect("valid date")
}

pub fn days_ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).expect("date in range")
}

pub fn open_json(dir: &Path) -> HabitLedger {
    HabitLedger::open(
        Box::new(JsonFileStore::in_dir(dir)),
        Box::new(FixedClock::on(today())),
    )
    .expect("Failed to open JSON ledger")
}

pub fn open_sqlite(dir: &Path) -> HabitLedger {
    let store = SqliteStore::open_in_dir(dir).expect("Failed to open SQLite store");
    HabitLedger::open(Box::new(store), Box::new(FixedClock::on(today())))
        .expect("Failed to open SQLite ledger")
}
