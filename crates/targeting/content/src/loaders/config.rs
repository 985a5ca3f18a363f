//! Enemy settings loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use targeting_core::{EnemyConfig, EnemyOption};

use crate::loaders::{LoadResult, read_file};

/// One `[enemies]`-style table: a bool per switch.
///
/// Absent keys leave the switch at whatever the target config already holds,
/// so older files keep working when switches are added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invisible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teammates: Option<bool>,
}

impl EnemySection {
    fn slot(&self, option: EnemyOption) -> Option<bool> {
        match option {
            EnemyOption::Players => self.players,
            EnemyOption::Mobs => self.mobs,
            EnemyOption::Animals => self.animals,
            EnemyOption::Invisible => self.invisible,
            EnemyOption::Dead => self.dead,
            EnemyOption::Friends => self.friends,
            EnemyOption::TeamMates => self.teammates,
        }
    }

    /// Section with every switch written out.
    pub fn from_config(config: &EnemyConfig) -> Self {
        Self {
            players: Some(config.players()),
            mobs: Some(config.hostile_mobs()),
            animals: Some(config.animals()),
            invisible: Some(config.invisible()),
            dead: Some(config.dead()),
            friends: Some(config.friends()),
            teammates: Some(config.teammates()),
        }
    }

    /// Overlays the switches present in this section onto `base`.
    pub fn apply_to(&self, base: EnemyConfig) -> EnemyConfig {
        EnemyOption::iter().fold(base, |config, option| match self.slot(option) {
            Some(enabled) => config.with(option, enabled),
            None => config,
        })
    }
}

/// Loader for enemy settings from TOML files.
///
/// The file holds a single `[enemies]` table; see [`EnemySection`].
pub struct ConfigLoader;

// Other tables may belong to other settings roots of the same store file.
#[derive(Deserialize)]
struct SettingsFile {
    #[serde(default)]
    enemies: EnemySection,
}

impl ConfigLoader {
    /// Load settings from a TOML file, starting from the defaults.
    pub fn load(path: &Path) -> LoadResult<EnemyConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    /// Parse settings from TOML text, starting from the defaults.
    pub fn parse(content: &str) -> LoadResult<EnemyConfig> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy settings TOML: {}", e))?;

        Ok(file.enemies.apply_to(EnemyConfig::default()))
    }
}
