//! Init command implementation

use anyhow::Result;
use std::path::Path;
use tracing::info;

use habit_ledger::config::{Config, StorageBackend};

/// Write the config file
///
/// With no storage overrides the commented default is written. Otherwise
/// the default config with `backend` and `data_dir` applied is saved.
pub fn init_command(
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
    backend: Option<StorageBackend>,
    force: bool,
) -> Result<()> {
    let global_path = Config::global_config_path();
    let path = config_path.unwrap_or(&global_path);

    let written = if backend.is_none() && data_dir.is_none() {
        Config::write_default(path, force)?
    } else if path.exists() && !force {
        false
    } else {
        let mut config = Config::default();
        if let Some(backend) = backend {
            config.storage.backend = backend;
        }
        config.storage.data_dir = data_dir.map(Path::to_path_buf);
        config.save_to_file(path)?;
        true
    };

    if written {
        info!("Initialized config");
        println!("Created {}", path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Ok(())
}
