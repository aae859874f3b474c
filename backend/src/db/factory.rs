//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring preference
//! repository instances based on runtime configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
#[cfg(feature = "file-repo")]
use super::repositories::FileRepository;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
use super::repository::{PreferenceRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// JSON file on disk
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory", "file")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `PREFERENCES_REPOSITORY`. Defaults to File if `PREFERENCES_PATH`
    /// is present, otherwise Local. An unrecognized `PREFERENCES_REPOSITORY`
    /// is a configuration error.
    pub fn from_env() -> RepositoryResult<Self> {
        if let Ok(val) = std::env::var("PREFERENCES_REPOSITORY") {
            return val.parse().map_err(|e| {
                RepositoryError::configuration(format!("PREFERENCES_REPOSITORY: {}", e))
            });
        }

        if std::env::var("PREFERENCES_PATH").is_ok() {
            Ok(Self::File)
        } else {
            Ok(Self::Local)
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use class_grid::db::{RepositoryFactory, RepositoryType};
///
/// let local = RepositoryFactory::create(RepositoryType::Local, None)?;
/// let file = RepositoryFactory::create(RepositoryType::File, Some("prefs.json".as_ref()))?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `path` - Backing file (required for File)
    ///
    /// # Returns
    /// * `Ok(Arc<dyn PreferenceRepository>)` - Shared repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn create(
        repo_type: RepositoryType,
        path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        match repo_type {
            RepositoryType::Local => {
                let _ = path;
                Self::create_local()
            }
            RepositoryType::File => {
                let path = path.ok_or_else(|| {
                    RepositoryError::configuration("File repository requires a path")
                })?;
                Self::create_file(path)
            }
        }
    }

    /// Create an in-memory local repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        Ok(Arc::new(LocalRepository::new()))
    }

    #[cfg(not(feature = "local-repo"))]
    pub fn create_local() -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        Err(RepositoryError::configuration(
            "Local repository feature not enabled",
        ))
    }

    /// Create a JSON file repository.
    #[cfg(feature = "file-repo")]
    pub fn create_file(path: &Path) -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        log::debug!("Using preference file {}", path.display());
        Ok(Arc::new(FileRepository::new(path)))
    }

    #[cfg(not(feature = "file-repo"))]
    pub fn create_file(path: &Path) -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        let _ = path;
        Err(RepositoryError::configuration(
            "File repository feature not enabled",
        ))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `PREFERENCES_REPOSITORY` and `PREFERENCES_PATH`.
    pub fn from_env() -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        let repo_type = RepositoryType::from_env()?;
        let path = std::env::var("PREFERENCES_PATH").ok().map(PathBuf::from);
        Self::create(repo_type, path.as_deref())
    }

    /// Create repository from a RepositoryConfig instance.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        Self::create(repo_type, config.file_path()?)
    }
}
