//! JSON file store

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::atomic::{sidecar_path, write_locked};
use super::{LedgerState, StateStore, UNREADABLE_SUFFIX};

/// Stores the ledger record as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/ledger.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("ledger.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read ledger from {}", self.path.display()))?;

        LedgerState::decode(&content).map(Some)
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        write_locked(&self.path, &state.encode()?)
            .with_context(|| format!("Failed to write ledger to {}", self.path.display()))?;
        tracing::debug!("Saved ledger to {}", self.path.display());
        Ok(())
    }

    /// Copy the file aside as `<name>.corrupt`
    fn preserve_unreadable(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let backup = sidecar_path(&self.path, UNREADABLE_SUFFIX);
        fs::copy(&self.path, &backup).with_context(|| {
            format!("Failed to back up unreadable ledger to {}", backup.display())
        })?;
        tracing::warn!("Unreadable ledger copied to {}", backup.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_roundtrips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("ledger.json"));
        let state = LedgerState {
            habits: Vec::new(),
            user: Some(User::default_profile("Tester", "t@example.com")),
        };

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{\"habits\": [").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_preserve_unreadable_copies_file_aside() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        store.preserve_unreadable().unwrap();
        assert!(!dir.path().join("ledger.json.corrupt").exists());

        fs::write(store.path(), "{\"habits\": [").unwrap();
        store.preserve_unreadable().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("ledger.json.corrupt")).unwrap(),
            "{\"habits\": ["
        );
    }
}
