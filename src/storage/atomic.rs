//! Locked, atomic file replacement shared by the ledger and config writers

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// `path` with `suffix` appended to its file name (`ledger.json` -> `ledger.json.lock`)
pub(crate) fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(suffix);
    path.with_file_name(name)
}

/// Replace `path` with `content`
///
/// Holds an exclusive lock on `<path>.lock` while writing `<path>.tmp`,
/// syncing it, and renaming it over `path`. Readers never see a partial file.
pub(crate) fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let lock_path = sidecar_path(path, ".lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()))?;

    let temp_path = sidecar_path(path, ".tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sidecar_keeps_full_file_name() {
        let path = Path::new("/data/ledger.json");
        assert_eq!(sidecar_path(path, ".lock"), Path::new("/data/ledger.json.lock"));
        assert_eq!(sidecar_path(path, ".corrupt"), Path::new("/data/ledger.json.corrupt"));
    }

    #[test]
    fn test_write_locked_replaces_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_locked(&path, "first").unwrap();
        write_locked(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!sidecar_path(&path, ".tmp").exists());
        assert!(sidecar_path(&path, ".lock").exists());
    }
}
