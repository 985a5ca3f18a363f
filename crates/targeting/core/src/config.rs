//! Enemy settings: which kinds and states of entities count as enemies.
//!
//! [`EnemyConfig`] is a small `Copy` value so every evaluation reads one
//! consistent snapshot. [`SharedEnemyConfig`] publishes it to other threads
//! (a settings UI, a command handler) as a single atomic word.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::TargetingError;
use crate::oracle::ConfigStore;

bitflags::bitflags! {
    /// Raw switch set backing [`EnemyConfig`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EnemyFlags: u8 {
        /// Other players.
        const PLAYERS = 1 << 0;
        /// Hostile mobs like zombies and skeletons.
        const HOSTILE_MOBS = 1 << 1;
        /// Animals like cows and pigs.
        const ANIMALS = 1 << 2;
        /// Entities that are currently invisible.
        const INVISIBLE = 1 << 3;
        /// Entities that are already dead.
        const DEAD = 1 << 4;
        /// Players on the client-side friend list (attack mode only).
        const FRIENDS = 1 << 5;
        /// Players on the viewer's team (attack mode only).
        const TEAMMATES = 1 << 6;
    }
}

impl Default for EnemyFlags {
    fn default() -> Self {
        Self::PLAYERS | Self::HOSTILE_MOBS | Self::INVISIBLE
    }
}

/// Name of one switch, as typed in commands and stored in settings files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyOption {
    Players,
    #[strum(to_string = "mobs", serialize = "hostile_mobs")]
    #[cfg_attr(feature = "serde", serde(rename = "mobs"))]
    Mobs,
    Animals,
    Invisible,
    Dead,
    Friends,
    #[strum(to_string = "teammates", serialize = "team_mates")]
    #[cfg_attr(feature = "serde", serde(rename = "teammates"))]
    TeamMates,
}

impl EnemyOption {
    pub const fn flag(self) -> EnemyFlags {
        match self {
            Self::Players => EnemyFlags::PLAYERS,
            Self::Mobs => EnemyFlags::HOSTILE_MOBS,
            Self::Animals => EnemyFlags::ANIMALS,
            Self::Invisible => EnemyFlags::INVISIBLE,
            Self::Dead => EnemyFlags::DEAD,
            Self::Friends => EnemyFlags::FRIENDS,
            Self::TeamMates => EnemyFlags::TEAMMATES,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Players => "other players",
            Self::Mobs => "hostile mobs such as zombies and skeletons",
            Self::Animals => "animals such as cows and pigs",
            Self::Invisible => "entities that are invisible",
            Self::Dead => "entities that are already dead",
            Self::Friends => "players on the friend list (attack mode)",
            Self::TeamMates => "entities on your own team (attack mode)",
        }
    }

    /// Parses a user-supplied option name.
    ///
    /// # Errors
    ///
    /// Returns [`TargetingError::UnknownOption`] for names that match no switch.
    pub fn parse(name: &str) -> Result<Self, TargetingError> {
        name.trim()
            .parse()
            .map_err(|_| TargetingError::UnknownOption(name.trim().to_owned()))
    }
}

/// Which entities count as enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyConfig {
    flags: EnemyFlags,
}

impl EnemyConfig {
    /// Settings with every switch off: nothing is an enemy.
    pub const fn none() -> Self {
        Self {
            flags: EnemyFlags::empty(),
        }
    }

    pub const fn from_flags(flags: EnemyFlags) -> Self {
        Self { flags }
    }

    pub const fn flags(&self) -> EnemyFlags {
        self.flags
    }

    pub const fn get(&self, option: EnemyOption) -> bool {
        self.flags.contains(option.flag())
    }

    pub fn set(&mut self, option: EnemyOption, enabled: bool) {
        self.flags.set(option.flag(), enabled);
    }

    /// Flips a switch and returns its new value.
    pub fn toggle(&mut self, option: EnemyOption) -> bool {
        self.flags.toggle(option.flag());
        self.get(option)
    }

    /// Builder-style [`EnemyConfig::set`].
    #[must_use]
    pub fn with(mut self, option: EnemyOption, enabled: bool) -> Self {
        self.set(option, enabled);
        self
    }

    pub const fn players(&self) -> bool {
        self.get(EnemyOption::Players)
    }

    pub const fn hostile_mobs(&self) -> bool {
        self.get(EnemyOption::Mobs)
    }

    pub const fn animals(&self) -> bool {
        self.get(EnemyOption::Animals)
    }

    pub const fn invisible(&self) -> bool {
        self.get(EnemyOption::Invisible)
    }

    pub const fn dead(&self) -> bool {
        self.get(EnemyOption::Dead)
    }

    pub const fn friends(&self) -> bool {
        self.get(EnemyOption::Friends)
    }

    pub const fn teammates(&self) -> bool {
        self.get(EnemyOption::TeamMates)
    }
}

/// Cloneable handle to one live [`EnemyConfig`].
///
/// Reads and writes go through a single atomic byte, so readers always see
/// either the old or the new settings, never a mix.
#[derive(Clone, Debug)]
pub struct SharedEnemyConfig {
    bits: Arc<AtomicU8>,
}

impl SharedEnemyConfig {
    pub fn new(config: EnemyConfig) -> Self {
        Self {
            bits: Arc::new(AtomicU8::new(config.flags.bits())),
        }
    }

    pub fn snapshot(&self) -> EnemyConfig {
        EnemyConfig::from_flags(EnemyFlags::from_bits_truncate(
            self.bits.load(Ordering::Acquire),
        ))
    }

    pub fn store(&self, config: EnemyConfig) {
        self.bits.store(config.flags.bits(), Ordering::Release);
    }

    /// Applies `f` atomically and returns the resulting settings.
    ///
    /// `f` runs once per attempt; it only runs again if another writer
    /// raced this one.
    pub fn update(&self, f: impl Fn(&mut EnemyConfig)) -> EnemyConfig {
        let mut stored = 0;

        // The closure never returns `None`, so the update cannot fail.
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                let mut config = EnemyConfig::from_flags(EnemyFlags::from_bits_truncate(bits));
                f(&mut config);
                stored = config.flags.bits();
                Some(stored)
            });

        EnemyConfig::from_flags(EnemyFlags::from_bits_truncate(stored))
    }

    pub fn toggle(&self, option: EnemyOption) -> bool {
        self.update(|config| {
            config.toggle(option);
        })
        .get(option)
    }

    /// Hands this handle to a settings store under the name `Enemies`.
    pub fn register_with(&self, store: &mut dyn ConfigStore) {
        store.register_root(ConfigRoot::new(ConfigRoot::ENEMIES, self.clone()));
    }
}

impl Default for SharedEnemyConfig {
    fn default() -> Self {
        Self::new(EnemyConfig::default())
    }
}

/// A named settings root exposed to persistence and UI layers.
#[derive(Clone, Debug)]
pub struct ConfigRoot {
    pub name: &'static str,
    pub handle: SharedEnemyConfig,
}

impl ConfigRoot {
    pub const ENEMIES: &'static str = "Enemies";

    pub fn new(name: &'static str, handle: SharedEnemyConfig) -> Self {
        Self { name, handle }
    }
}
