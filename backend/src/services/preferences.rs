//! Color preference persistence.
//!
//! Color overrides are read once when the view opens and written back after
//! every color edit. The stored value is a JSON object mapping person names to
//! color strings. Persistence is best-effort: the in-memory store stays
//! authoritative for the session and the next successful write reconciles
//! anything a failed one dropped.

use std::collections::BTreeMap;

use crate::db::repository::{PreferenceRepository, RepositoryResult};
use crate::db::DEFAULT_PREFERENCES_KEY;
use crate::models::Color;
use crate::services::store::ScheduleStore;

/// Person name to color.
pub type ColorPreferenceMap = BTreeMap<String, Color>;

/// Binds a preference repository to the key the color map lives under.
#[derive(Debug, Clone)]
pub struct ColorPreferences<R> {
    repository: R,
    key: String,
}

impl<R: PreferenceRepository> ColorPreferences<R> {
    /// Use the default `colorPreferences` key.
    pub fn new(repository: R) -> Self {
        Self::with_key(repository, DEFAULT_PREFERENCES_KEY)
    }

    pub fn with_key(repository: R, key: impl Into<String>) -> Self {
        Self {
            repository,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Read the saved overrides.
    ///
    /// Never fails: a missing key, an unreachable store and an unparseable
    /// value all yield an empty map.
    pub fn load(&self) -> ColorPreferenceMap {
        let raw = match self.repository.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No saved color preferences under '{}'", self.key);
                return ColorPreferenceMap::new();
            }
            Err(e) => {
                log::warn!("Could not read color preferences: {}", e);
                return ColorPreferenceMap::new();
            }
        };

        match serde_json::from_str::<ColorPreferenceMap>(&raw) {
            Ok(map) => {
                log::debug!("Loaded {} saved colors from '{}'", map.len(), self.key);
                map
            }
            Err(e) => {
                log::warn!(
                    "Ignoring malformed color preferences under '{}': {}",
                    self.key,
                    e
                );
                ColorPreferenceMap::new()
            }
        }
    }

    /// Write every person's current color, reporting failures to the caller.
    pub fn try_save(&self, store: &ScheduleStore) -> RepositoryResult<()> {
        let json = serde_json::to_string(&store.color_map())?;
        self.repository
            .set(&self.key, &json)
            .map_err(|e| e.with_operation("save_color_preferences"))?;
        log::debug!("Saved {} colors under '{}'", store.len(), self.key);
        Ok(())
    }

    /// Write every person's current color; failures are logged and dropped.
    pub fn save(&self, store: &ScheduleStore) {
        if let Err(e) = self.try_save(store) {
            log::warn!("Color preferences not saved: {}", e);
        }
    }
}
