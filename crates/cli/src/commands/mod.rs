//! Command implementations for the `enemy` binary.
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod options;
mod scan;

pub use options::{List, Reset, Set, Toggle};
pub use scan::Scan;

use anyhow::{Context, Result};
use targeting_content::FileConfigStore;
use targeting_core::SharedEnemyConfig;

use crate::config::CliConfig;

/// Settings file with the `Enemies` root registered and loaded.
pub(crate) struct Settings {
    pub store: FileConfigStore,
    pub enemies: SharedEnemyConfig,
}

impl Settings {
    pub fn open(config: &CliConfig) -> Result<Self> {
        let mut store = FileConfigStore::new(&config.config_path);
        let enemies = SharedEnemyConfig::default();
        enemies.register_with(&mut store);

        store
            .load()
            .with_context(|| format!("Failed to load settings from {}", config.config_path.display()))?;

        Ok(Self { store, enemies })
    }

    pub fn save(&self) -> Result<()> {
        self.store.save()?;
        tracing::info!("Saved settings to {}", self.store.path().display());
        Ok(())
    }
}
