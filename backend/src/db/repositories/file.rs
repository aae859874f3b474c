//! JSON file repository implementation.
//!
//! All keys share one JSON object on disk (`{"colorPreferences": "..."}`).
//! Writes go to a sibling temporary file that is then renamed over the
//! original, so a reader never sees a half-written document. Temporary
//! names carry the process id and a counter so concurrent writers never
//! share one.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::db::repository::*;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File-backed repository that survives process restarts.
pub struct FileRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileRepository {
    /// Create a repository stored at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> RepositoryResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(RepositoryError::from(e)
                    .with_operation("read")
                    .with_key(self.path.display().to_string()))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::from(e)
                .with_operation("read")
                .with_key(self.path.display().to_string())
        })
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| RepositoryError::from(e).with_operation("write"))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            RepositoryError::from(e).with_operation("rename")
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "preferences.json".into());
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        self.path.with_file_name(name)
    }
}

impl PreferenceRepository for FileRepository {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let document = self.read_document().map_err(|e| e.with_key(key))?;
        Ok(document.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock();
        // A corrupt document is replaced rather than blocking every future write.
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(RepositoryError::SerializationError { .. }) => {
                log::warn!(
                    "Preference file {} is not valid JSON; starting a new document",
                    self.path.display()
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e.with_key(key)),
        };
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document)
            .map_err(|e| e.with_key(key))
    }

    /// Healthy when the nearest existing ancestor of the file is a directory
    /// that the first write can create the file under.
    fn health_check(&self) -> RepositoryResult<bool> {
        let existing = self
            .path
            .ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty())
            .find(|dir| dir.exists());
        match existing {
            Some(dir) => Ok(dir.is_dir()),
            None => Ok(true),
        }
    }
}
