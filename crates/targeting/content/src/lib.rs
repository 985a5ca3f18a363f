//! File formats for enemy settings and recorded worlds.
//!
//! `targeting-core` owns no on-disk format. This crate provides
//! the ones the tools use: TOML for persisted settings (via
//! [`FileConfigStore`]) and RON for world scenarios replayed by the CLI.
pub mod loaders;
pub mod store;

pub use loaders::{
    ConfigLoader, EnemySection, EntityRecord, LoadResult, Scenario, ScenarioLoader,
};
pub use store::FileConfigStore;
