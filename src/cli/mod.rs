//! CLI command implementations

pub mod habit;
pub mod init;
pub mod profile;
pub mod report;

use anyhow::{bail, Result};
use std::path::Path;

use habit_ledger::config::Config;
use habit_ledger::{HabitId, HabitLedger, SystemClock};

/// Load config and open the ledger it points at
pub fn open_ledger(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<HabitLedger> {
    let config = match config_path {
        Some(path) => Config::load_or_init(path)?,
        None => Config::load()?,
    };

    let store = match data_dir {
        Some(dir) => config.storage.open_store_in(dir)?,
        None => config.storage.open_store()?,
    };

    let ledger = HabitLedger::open_with_profile(store, Box::new(SystemClock), &config.profile)?;
    Ok(ledger)
}

/// Find a habit by full id or unique id prefix
pub fn resolve_id(ledger: &HabitLedger, query: &str) -> Result<HabitId> {
    let query = query.trim();
    if let Some(habit) = ledger.habits().iter().find(|h| h.id.as_str() == query) {
        return Ok(habit.id.clone());
    }

    let matches: Vec<_> = ledger
        .habits()
        .iter()
        .filter(|h| !query.is_empty() && h.id.as_str().starts_with(query))
        .collect();

    match matches.as_slice() {
        [habit] => Ok(habit.id.clone()),
        [] => bail!("No habit matches '{}'", query),
        _ => bail!("'{}' matches {} habits, use a longer prefix", query, matches.len()),
    }
}

/// First 8 characters of an id, for listings
pub fn short_id(id: &HabitId) -> &str {
    let s = id.as_str();
    s.char_indices().nth(8).map_or(s, |(i, _)| &s[..i])
}
