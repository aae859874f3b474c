//! Immutable collection of person schedules.
//!
//! The store is built once from the dataset and the saved color overrides.
//! Mutations never happen in place: [`ScheduleStore::set_color`] returns a
//! new store, so a reader holding the previous `Arc<ScheduleStore>` keeps a
//! consistent snapshot.

use crate::models::{Color, PersonSchedule};
use crate::services::preferences::ColorPreferenceMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    persons: Vec<PersonSchedule>,
}

impl ScheduleStore {
    /// Merge the raw dataset with saved color overrides.
    ///
    /// An override wins when present; otherwise the dataset color is kept.
    /// Input order is preserved and override keys naming unknown persons are
    /// ignored.
    pub fn build(raw: &[PersonSchedule], overrides: &ColorPreferenceMap) -> Self {
        let persons = raw
            .iter()
            .map(|person| match overrides.get(&person.name) {
                Some(color) => person.with_color(color.clone()),
                None => person.clone(),
            })
            .collect();
        Self { persons }
    }

    /// Store with `name`'s color replaced.
    ///
    /// An unknown name yields an unchanged copy; a stale reference from the
    /// view must never fail.
    pub fn set_color(&self, name: &str, color: Color) -> Self {
        if !self.contains(name) {
            log::debug!("Ignoring color change for unknown person '{}'", name);
            return self.clone();
        }

        let persons = self
            .persons
            .iter()
            .map(|person| {
                if person.name == name {
                    person.with_color(color.clone())
                } else {
                    person.clone()
                }
            })
            .collect();
        Self { persons }
    }

    pub fn persons(&self) -> &[PersonSchedule] {
        &self.persons
    }

    pub fn get(&self, name: &str) -> Option<&PersonSchedule> {
        self.persons.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Person names in store order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.persons.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Every person's current color, keyed by name.
    pub fn color_map(&self) -> ColorPreferenceMap {
        self.persons
            .iter()
            .map(|p| (p.name.clone(), p.color.clone()))
            .collect()
    }
}
