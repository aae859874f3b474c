//! Repository implementations module.
//!
//! This module contains the implementations of the `PreferenceRepository` trait:
//! - `local`: In-memory implementation for unit testing and embedding
//! - `file`: JSON file implementation that persists across restarts
#[cfg(feature = "file-repo")]
pub mod file;
#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "file-repo")]
pub use file::FileRepository;
#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
