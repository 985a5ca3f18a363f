//! TOML-backed settings store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use targeting_core::{ConfigRoot, ConfigStore};

use crate::loaders::{EnemySection, LoadResult, read_file};

/// Persists registered settings roots to one TOML file.
///
/// Each root becomes a table named after the lowercased root name, so the
/// `Enemies` root lives under `[enemies]`.
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    roots: Vec<ConfigRoot>,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            roots: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn roots(&self) -> &[ConfigRoot] {
        &self.roots
    }

    pub fn root(&self, name: &str) -> Option<&ConfigRoot> {
        self.roots
            .iter()
            .find(|root| root.name.eq_ignore_ascii_case(name))
    }

    /// Reads the file into every registered root.
    ///
    /// A missing file leaves all roots untouched. Tables without a registered
    /// root are skipped with a warning.
    pub fn load(&self) -> LoadResult<()> {
        if !self.path.exists() {
            tracing::debug!("No settings file at {}, keeping defaults", self.path.display());
            return Ok(());
        }

        let content = read_file(&self.path)?;
        let tables: BTreeMap<String, toml::Value> = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", self.path.display(), e))?;

        for (name, table) in tables {
            match self.root(&name) {
                Some(root) => {
                    let section: EnemySection = table
                        .try_into()
                        .map_err(|e| anyhow::anyhow!("Invalid [{}] table: {}", name, e))?;
                    let merged = section.apply_to(root.handle.snapshot());
                    root.handle.store(merged);
                    tracing::debug!("Loaded settings root {} from {}", root.name, self.path.display());
                }
                None => tracing::warn!("Ignoring unknown settings table [{name}]"),
            }
        }

        Ok(())
    }

    /// Writes the current value of every registered root.
    pub fn save(&self) -> LoadResult<()> {
        let tables: BTreeMap<String, EnemySection> = self
            .roots
            .iter()
            .map(|root| {
                (
                    root.name.to_ascii_lowercase(),
                    EnemySection::from_config(&root.handle.snapshot()),
                )
            })
            .collect();

        let content = toml::to_string_pretty(&tables)
            .map_err(|e| anyhow::anyhow!("Failed to serialize settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
        std::fs::write(&self.path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", self.path.display(), e))?;

        tracing::debug!("Saved {} settings roots to {}", self.roots.len(), self.path.display());
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn register_root(&mut self, root: ConfigRoot) {
        tracing::trace!("Registered settings root {}", root.name);
        self.roots
            .retain(|existing| !existing.name.eq_ignore_ascii_case(root.name));
        self.roots.push(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use targeting_core::{EnemyConfig, EnemyOption, SharedEnemyConfig};

    #[test]
    fn registration_replaces_same_name() {
        let mut store = FileConfigStore::new("unused.toml");
        let first = SharedEnemyConfig::default();
        let second = SharedEnemyConfig::new(EnemyConfig::none());

        first.register_with(&mut store);
        second.register_with(&mut store);

        assert_eq!(store.roots().len(), 1);
        assert_eq!(store.root("enemies").unwrap().handle.snapshot(), EnemyConfig::none());
    }

    #[test]
    fn registration_ignores_name_case() {
        let mut store = FileConfigStore::new("unused.toml");
        let lower = SharedEnemyConfig::default();
        let upper = SharedEnemyConfig::new(EnemyConfig::none());

        store.register_root(ConfigRoot::new("enemies", lower));
        store.register_root(ConfigRoot::new("Enemies", upper));

        assert_eq!(store.roots().len(), 1);
        assert_eq!(store.roots()[0].name, "Enemies");
        assert_eq!(store.root("ENEMIES").unwrap().handle.snapshot(), EnemyConfig::none());
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::new(dir.path().join("absent.toml"));
        let shared = SharedEnemyConfig::default();
        shared.register_with(&mut store);

        store.load().unwrap();
        assert_eq!(shared.snapshot(), EnemyConfig::default());
    }

    #[test]
    fn load_overlays_registered_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[enemies]\ndead = true\n\n[radar]\nrange = 4\n").unwrap();

        let mut store = FileConfigStore::new(&path);
        let shared = SharedEnemyConfig::default();
        shared.register_with(&mut store);
        store.load().unwrap();

        assert_eq!(
            shared.snapshot(),
            EnemyConfig::default().with(EnemyOption::Dead, true)
        );
    }

    #[test]
    fn bad_switch_in_known_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[enemies]\ncreepers = true\n").unwrap();

        let mut store = FileConfigStore::new(&path);
        SharedEnemyConfig::default().register_with(&mut store);

        let error = store.load().unwrap_err();
        assert!(error.to_string().contains("[enemies]"));
    }
}
