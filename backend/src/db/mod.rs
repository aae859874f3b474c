//! Storage module for per-person color preferences.
//!
//! This module provides an abstraction over the external key-value store via
//! the Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (ScheduleBoard, grid-status CLI)      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  services::preferences - load/save of the color map      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository) - get/set by key          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │ Local (memory) │ File (JSON) │
//!     └──────────────────────────────┘
//! ```
//!
//! # Module Organization
//! - `repository`: Trait definition and error types
//! - `repositories::local`: In-memory implementation
//! - `repositories::file`: JSON file implementation
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: The `[repository]` configuration table

#[cfg(not(any(feature = "local-repo", feature = "file-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{RepositoryConfig, DEFAULT_PREFERENCES_KEY};
#[cfg(feature = "file-repo")]
pub use repositories::FileRepository;
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, PreferenceRepository, RepositoryError, RepositoryResult};
