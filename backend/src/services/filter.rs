//! Visibility filter: the set of persons currently shown.

use std::collections::HashSet;

use crate::services::store::ScheduleStore;

/// Membership-only set of selected person names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityFilter {
    selected: HashSet<String>,
}

impl VisibilityFilter {
    /// Every person in the store selected; the initial state of a view.
    pub fn all(store: &ScheduleStore) -> Self {
        Self::from_names(store.names())
    }

    /// Nothing selected.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter with `name` flipped: added if absent, removed if present.
    pub fn toggled(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.toggle(name);
        next
    }

    /// Flip `name` in place.
    pub fn toggle(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected names in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected.iter().map(String::as_str)
    }
}
