//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::storage::write_locked;

/// Written on first load
pub const DEFAULT_CONFIG: &str = r#"# Habit Ledger configuration
# ==========================

# Where habits and the user profile are stored.
#
#   backend  - "json" (ledger.json) or "sqlite" (ledger.db)
#   data_dir - directory for ledger files (default: ~/.habit-ledger)
[storage]
backend = "json"
# data_dir = "/path/to/dir"

# Profile created the first time the ledger opens without a user.
[profile]
name = "Habit Champion"
email = "user@example.com"
"#;

impl Config {
    /// Get the global config directory path (~/.habit-ledger/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".habit-ledger")
    }

    /// Get the global config file path (~/.habit-ledger/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path`, writing the default file there first if missing
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::write_default(path, false)?;
        }
        Self::from_file(path)
    }

    /// Load the global configuration, creating it on first use
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::global_config_path())
    }

    /// Write the commented default config. Returns false if a file already
    /// exists and `force` is not set.
    pub fn write_default(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        write_locked(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        tracing::info!("Wrote default config to {}", path.display());
        Ok(true)
    }

    /// Save configuration to a file with atomic write and file locking
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
            .with_context(|| format!("Failed to save config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use tempfile::tempdir;

    #[test]
    fn test_load_or_init_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_or_init(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_default_respects_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbackend = \"sqlite\"\n").unwrap();

        assert!(!Config::write_default(&path, false).unwrap());
        assert_eq!(Config::from_file(&path).unwrap().storage.backend, StorageBackend::Sqlite);

        assert!(Config::write_default(&path, true).unwrap());
        assert_eq!(Config::from_file(&path).unwrap().storage.backend, StorageBackend::Json);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().join("data"));
        config.profile.name = "Sam".to_string();

        config.save_to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}
