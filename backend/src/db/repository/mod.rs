//! Repository trait for the string-keyed preference store.
//!
//! The view only ever needs two primitives from its backing store: read the
//! value stored under a key and overwrite it. Both the in-memory and the
//! file-backed implementations live in [`crate::db::repositories`].
//!
//! # Example
//!
//! ```ignore
//! fn remember<R: PreferenceRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     repo.set("colorPreferences", r#"{"Ana":"#ff0000"}"#)?;
//!     assert!(repo.get("colorPreferences")?.is_some());
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// A get/set string-keyed store.
///
/// Implementations must make `set` atomic per key: a concurrent or later
/// `get` observes either the previous value or the new one, never a mix.
pub trait PreferenceRepository: Send + Sync {
    /// Value stored under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// Whether the store is currently reachable.
    fn health_check(&self) -> RepositoryResult<bool>;
}

impl<R: PreferenceRepository + ?Sized> PreferenceRepository for std::sync::Arc<R> {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        (**self).set(key, value)
    }

    fn health_check(&self) -> RepositoryResult<bool> {
        (**self).health_check()
    }
}
