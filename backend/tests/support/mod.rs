#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use class_grid::models::{load_dataset, PersonSchedule};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Every variable the crate reads, cleared.
pub const CLEAN_ENV: [(&str, Option<&str>); 4] = [
    ("GRID_DATASET", None),
    ("PREFERENCES_REPOSITORY", None),
    ("PREFERENCES_PATH", None),
    ("PRESENCE_TICK_SECONDS", None),
];

/// Path of the bundled sample dataset.
pub fn sample_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("schedules.json")
}

/// The bundled sample dataset: Ana, Bruno, Carla and Diego.
pub fn sample_dataset() -> Vec<PersonSchedule> {
    load_dataset(sample_dataset_path()).expect("sample dataset should load")
}

/// A Monday at `h:m`; 2024-01-01 was a Monday.
pub fn monday(h: u32, m: u32) -> NaiveDateTime {
    on_day(1, h, m)
}

/// 2024-01-`day` at `h:m` (1 = Monday … 7 = Sunday).
pub fn on_day(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .expect("valid date")
        .and_hms_opt(h, m, 0)
        .expect("valid time")
}
