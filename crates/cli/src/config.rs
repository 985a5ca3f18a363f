//! Runtime configuration for the `enemy` binary.
use std::env;
use std::path::PathBuf;

/// Where settings live and where logs go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub config_path: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ENEMY_CONFIG_PATH` - Settings file (default: platform config dir)
    /// - `ENEMY_LOG_DIR` - Also write logs to `enemy.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("ENEMY_CONFIG_PATH") {
            config.config_path = path;
        }
        config.log_dir = read_env::<PathBuf>("ENEMY_LOG_DIR");

        config
    }

    /// Command-line flags take precedence over the environment.
    #[must_use]
    pub fn with_overrides(mut self, config_path: Option<PathBuf>, log_dir: Option<PathBuf>) -> Self {
        if let Some(path) = config_path {
            self.config_path = path;
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        self
    }
}

/// Platform settings file:
/// - Linux: `~/.config/enemy/enemies.toml` (or `$XDG_CONFIG_HOME/enemy`)
/// - macOS: `~/Library/Application Support/enemy/enemies.toml`
/// - Windows: `%APPDATA%\enemy\config\enemies.toml`
/// - Fallback: `./enemies.toml`
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "enemy")
        .map(|dirs| dirs.config_dir().join("enemies.toml"))
        .unwrap_or_else(|| PathBuf::from("./enemies.toml"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.parse().ok()
}
