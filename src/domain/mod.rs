//! Core domain types for Habit Ledger

mod habit;
mod user;

pub use habit::{ALL_DAYS, DEFAULT_ICON, Habit, HabitCategory, HabitId, HabitUpdate, NewHabit};
pub use user::{Theme, User};
