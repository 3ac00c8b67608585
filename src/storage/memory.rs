//! In-process store, mainly for tests

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::{LedgerState, StateStore};

/// Keeps the encoded record in memory
///
/// Clones share the same record, so a test can hand one clone to a ledger
/// and inspect or reuse the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Arc<Mutex<Option<String>>>,
    preserved: Arc<Mutex<Option<String>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw text as the stored record (may be invalid JSON)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut blob) = store.blob.lock() {
            *blob = Some(raw.into());
        }
        store
    }

    /// The stored record as text
    pub fn raw(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|b| b.clone())
    }

    /// The record set aside by `preserve_unreadable`, if any
    pub fn preserved(&self) -> Option<String> {
        self.preserved.lock().ok().and_then(|b| b.clone())
    }

    /// Make subsequent saves fail, to exercise error paths
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_saves.lock() {
            *flag = fail;
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        let blob = self.blob.lock().map_err(|_| anyhow!("Memory store lock poisoned"))?;
        blob.as_deref().map(LedgerState::decode).transpose()
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let failing = *self
            .fail_saves
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        if failing {
            return Err(anyhow!("Memory store is read-only"));
        }

        let encoded = state.encode()?;
        let mut blob = self.blob.lock().map_err(|_| anyhow!("Memory store lock poisoned"))?;
        *blob = Some(encoded);
        Ok(())
    }

    fn preserve_unreadable(&self) -> Result<()> {
        let current = self.raw();
        if current.is_some() {
            let mut preserved = self
                .preserved
                .lock()
                .map_err(|_| anyhow!("Memory store lock poisoned"))?;
            *preserved = current;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_none() {
        assert!(MemoryStore::new().load().unwrap().is_none());
    }

    #[test]
    fn test_clones_share_record() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save(&LedgerState::default()).unwrap();
        assert_eq!(other.load().unwrap(), Some(LedgerState::default()));
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let store = MemoryStore::with_raw("]]");
        assert!(store.load().is_err());
    }

    #[test]
    fn test_failing_saves() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        assert!(store.save(&LedgerState::default()).is_err());
        assert!(store.raw().is_none());
    }

    #[test]
    fn test_preserve_unreadable_keeps_raw_text() {
        let store = MemoryStore::with_raw("]]");
        store.preserve_unreadable().unwrap();
        store.save(&LedgerState::default()).unwrap();
        assert_eq!(store.preserved().as_deref(), Some("]]"));
    }
}
