//! Repository configuration file support.
//!
//! This module describes the `[repository]` table of the configuration file.
//! [`crate::config::AppConfig`] reads it along with the other tables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Storage key the color preferences are kept under.
pub const DEFAULT_PREFERENCES_KEY: &str = "colorPreferences";

/// Preference store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// Backing file for the `file` repository type.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Key the color preference map is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_key() -> String {
    DEFAULT_PREFERENCES_KEY.to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            path: None,
            key: default_key(),
        }
    }
}

impl RepositoryConfig {
    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repo_type)
    }

    /// Backing file for a `file` repository.
    ///
    /// # Errors
    /// Returns a configuration error when the type is `file` and no path is set.
    pub fn file_path(&self) -> Result<Option<&Path>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match (repo_type, self.path.as_deref()) {
            (RepositoryType::File, Some(path)) => Ok(Some(path)),
            (RepositoryType::File, None) => Err(RepositoryError::configuration(
                "File repository requires 'repository.path' setting",
            )),
            (RepositoryType::Local, _) => Ok(None),
        }
    }
}
