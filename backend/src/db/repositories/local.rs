//! In-memory local repository implementation.
//!
//! This module provides a local implementation of [`PreferenceRepository`]
//! suitable for unit testing and embedding. Values live in a `HashMap` for the
//! lifetime of the repository, so nothing survives a process restart.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::*;

/// In-memory local repository.
///
/// Clones share the same underlying map, which lets a test keep a handle to
/// the store it hands to a [`ColorPreferences`](crate::services::preferences::ColorPreferences).
///
/// # Example
/// ```
/// use class_grid::db::repositories::LocalRepository;
/// use class_grid::db::repository::PreferenceRepository;
///
/// let repo = LocalRepository::new();
/// repo.set("colorPreferences", "{}").unwrap();
/// assert_eq!(repo.get("colorPreferences").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    values: HashMap<String, String>,
    writes: usize,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            writes: 0,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with `key = value`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let repo = Self::new();
        repo.data.write().values.insert(key.into(), value.into());
        repo
    }

    /// Set the health status for testing storage failures.
    ///
    /// While unhealthy, every `get` and `set` fails with an unavailable error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.data.read().writes
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceRepository for LocalRepository {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let data = self.data.read();
        if !data.is_healthy {
            return Err(RepositoryError::unavailable_with_context(
                "Local repository is marked unhealthy",
                ErrorContext::new("get").with_key(key),
            ));
        }
        Ok(data.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut data = self.data.write();
        if !data.is_healthy {
            return Err(RepositoryError::unavailable_with_context(
                "Local repository is marked unhealthy",
                ErrorContext::new("set").with_key(key),
            ));
        }
        data.values.insert(key.to_string(), value.to_string());
        data.writes += 1;
        Ok(())
    }

    fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
