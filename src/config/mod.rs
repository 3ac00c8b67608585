//! Configuration loading and management

mod io;

pub use io::DEFAULT_CONFIG;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::storage::{JsonFileStore, SqliteStore, StateStore};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the ledger is stored
    #[serde(default)]
    pub storage: StorageSettings,

    /// Profile used when no user exists yet
    #[serde(default)]
    pub profile: ProfileSettings,
}

/// Which persistence backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown backend '{}' (expected json or sqlite)", other)),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for ledger files (defaults to ~/.habit-ledger)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Configured data directory, or the global one
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(Config::global_config_dir)
    }

    /// Build the configured store
    pub fn open_store(&self) -> Result<Box<dyn StateStore>> {
        self.open_store_in(&self.data_dir())
    }

    /// Build the configured store rooted at `dir`
    pub fn open_store_in(&self, dir: &Path) -> Result<Box<dyn StateStore>> {
        tracing::debug!("Opening {:?} ledger store in {}", self.backend, dir.display());
        let store: Box<dyn StateStore> = match self.backend {
            StorageBackend::Json => Box::new(JsonFileStore::in_dir(dir)),
            StorageBackend::Sqlite => Box::new(SqliteStore::open_in_dir(dir)?),
        };
        Ok(store)
    }
}

/// First-run profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default = "default_profile_name")]
    pub name: String,

    #[serde(default = "default_profile_email")]
    pub email: String,
}

fn default_profile_name() -> String {
    "Habit Champion".to_string()
}

fn default_profile_email() -> String {
    "user@example.com".to_string()
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            email: default_profile_email(),
        }
    }
}

impl ProfileSettings {
    pub fn to_user(&self) -> User {
        User::default_profile(&self.name, &self.email)
    }
}
