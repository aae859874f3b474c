//! # Class Grid
//!
//! Weekly class-schedule board for a small group of people.
//!
//! The crate loads a static dataset of person schedules, merges it with
//! per-person color preferences kept in a key-value store, and answers the
//! queries a weekly grid view needs: which sessions occupy a given
//! (day, hour) cell, how overlapping sessions share that cell, and who is in
//! class right now.
//!
//! ## Features
//!
//! - **Time model**: zero-padded `HH:MM` values and weekday tokens, with
//!   half-open interval activity checks
//! - **Schedule store**: immutable dataset merged with saved colors, replaced
//!   wholesale on every edit
//! - **Slot indexing and conflict layout**: per-cell session lists and the
//!   sub-grid shape for crowded cells
//! - **Live presence**: who is in class now, recomputed by a tokio ticker
//! - **Preference persistence**: pluggable repositories (in-memory or JSON
//!   file) selected from the environment or a TOML file
//!
//! ## Architecture
//!
//! - [`models`]: time values, sessions, person schedules and the dataset loader
//! - [`db`]: preference repository trait, implementations and factory
//! - [`services`]: store, filter, slot indexer, layout, presence and the board façade
//! - [`config`]: `grid-status.toml` application settings
//!
//! ## Example
//!
//! ```
//! use class_grid::db::LocalRepository;
//! use class_grid::models::parse_dataset_json_str;
//! use class_grid::services::{ColorPreferences, ScheduleBoard};
//!
//! let raw = parse_dataset_json_str(
//!     r##"[{"nombre": "Ana", "color": "#ff0000", "clases": [
//!         {"dia": "Lunes", "materia": "Math", "horaInicio": "09:00", "horaFin": "10:00"}
//!     ]}]"##,
//! )
//! .unwrap();
//!
//! let board = ScheduleBoard::open(&raw, ColorPreferences::new(LocalRepository::new()));
//! let slot = board.slot("Monday".parse().unwrap(), "09:00".parse().unwrap());
//! assert_eq!(slot.active_sessions[0].session.subject, "Math");
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
