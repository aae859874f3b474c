//! Application configuration.
//!
//! Settings come from an optional `grid-status.toml` file:
//!
//! ```toml
//! [dataset]
//! path = "data/schedules.json"
//!
//! [repository]
//! type = "file"                # "local" or "file"
//! path = "color-preferences.json"
//! key = "colorPreferences"
//!
//! [grid]
//! days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
//! first_hour = 8
//! hour_count = 12
//!
//! [presence]
//! tick_seconds = 60
//! ```
//!
//! Every table and field is optional. Environment variables override the
//! file: `GRID_DATASET`, `PREFERENCES_REPOSITORY`, `PREFERENCES_PATH` and
//! `PRESENCE_TICK_SECONDS`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::db::RepositoryConfig;
use crate::services::grid::GridSpec;
use crate::services::presence::MIN_TICK;

/// Configuration file name searched by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "grid-status.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: DatasetSettings,
    pub repository: RepositoryConfig,
    pub grid: GridSpec,
    pub presence: PresenceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// JSON file holding the person schedules.
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/schedules.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceSettings {
    pub tick_seconds: u64,
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self { tick_seconds: 60 }
    }
}

impl PresenceSettings {
    /// Ticker period, never shorter than one second.
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.tick_seconds).max(MIN_TICK)
    }
}

impl AppConfig {
    /// Parse a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `grid-status.toml` from the first standard location that has one.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to the defaults when no file exists.
    pub fn from_default_location() -> Result<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in &search_paths {
            if path.exists() {
                log::debug!("Loading configuration from {}", path.display());
                return Self::from_file(path);
            }
        }

        log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Apply environment overrides on top of the file settings.
    ///
    /// Setting `PREFERENCES_PATH` alone also switches the repository to
    /// `file`, the same rule [`RepositoryType::from_env`] follows.
    ///
    /// [`RepositoryType::from_env`]: crate::db::RepositoryType::from_env
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("GRID_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }

        let repo_type = std::env::var("PREFERENCES_REPOSITORY").ok();
        if let Ok(path) = std::env::var("PREFERENCES_PATH") {
            self.repository.path = Some(PathBuf::from(path));
            if repo_type.is_none() {
                self.repository.repo_type = "file".to_string();
            }
        }
        if let Some(repo_type) = repo_type {
            self.repository.repo_type = repo_type;
        }

        if let Ok(raw) = std::env::var("PRESENCE_TICK_SECONDS") {
            self.presence.tick_seconds = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid PRESENCE_TICK_SECONDS '{}'", raw))?;
        }

        Ok(())
    }

    /// [`from_default_location`](Self::from_default_location) followed by
    /// the environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_default_location()?;
        config.apply_env_overrides()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RepositoryType;
    use crate::models::Weekday;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.dataset.path, PathBuf::from("data/schedules.json"));
        assert_eq!(config.repository.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.grid, GridSpec::default());
        assert_eq!(config.presence.period(), Duration::from_secs(60));
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
[dataset]
path = "horarios.json"

[repository]
type = "file"
path = "prefs.json"
key = "colors"

[grid]
days = ["Lunes", "Tuesday"]
first_hour = 8
hour_count = 10

[presence]
tick_seconds = 30
"#,
        )
        .unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("horarios.json"));
        assert_eq!(config.repository.file_path().unwrap(), Some(Path::new("prefs.json")));
        assert_eq!(config.repository.key, "colors");
        assert_eq!(config.grid.days, vec![Weekday::Monday, Weekday::Tuesday]);
        assert_eq!(config.grid.hour_slots().len(), 10);
        assert_eq!(config.presence.tick_seconds, 30);
    }

    #[test]
    fn test_grid_days_accept_short_names() {
        let config = AppConfig::from_toml_str("[grid]\ndays = [\"Mon\", \"FRI\"]\n").unwrap();
        assert_eq!(config.grid.days, vec![Weekday::Monday, Weekday::Friday]);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let settings = PresenceSettings { tick_seconds: 0 };
        assert_eq!(settings.period(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[presence]\ntick_seconds = \"soon\"\n").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains(CONFIG_FILE_NAME));
    }
}
