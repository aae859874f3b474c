//! View state for one open schedule board.
//!
//! [`ScheduleBoard`] ties the pure pieces together the way a mounted view
//! uses them: the store is built once from the dataset and the saved
//! colors, every color edit replaces it and is persisted right away, and the
//! visibility filter starts with everyone selected. Readers that live on
//! other tasks (the presence ticker) follow store replacements through a
//! `watch` channel of snapshots.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::watch;

use crate::db::repository::PreferenceRepository;
use crate::models::{Color, PersonSchedule, TimeOfDay, Weekday};
use crate::services::filter::VisibilityFilter;
use crate::services::grid::{render_week, GridSpec, WeekGrid};
use crate::services::preferences::ColorPreferences;
use crate::services::presence::{self, Clock, PresenceTicker};
use crate::services::slots::{active_in_slot, RenderedSlot};
use crate::services::store::ScheduleStore;

pub struct ScheduleBoard<R> {
    store: Arc<ScheduleStore>,
    filter: VisibilityFilter,
    preferences: ColorPreferences<R>,
    snapshots: watch::Sender<Arc<ScheduleStore>>,
}

impl<R: PreferenceRepository> ScheduleBoard<R> {
    /// Load saved colors, build the store and select everyone.
    pub fn open(raw: &[PersonSchedule], preferences: ColorPreferences<R>) -> Self {
        let overrides = preferences.load();
        let store = Arc::new(ScheduleStore::build(raw, &overrides));
        let filter = VisibilityFilter::all(&store);
        let (snapshots, _) = watch::channel(Arc::clone(&store));

        log::info!(
            "Opened schedule board with {} persons ({} saved colors)",
            store.len(),
            overrides.len()
        );

        Self {
            store,
            filter,
            preferences,
            snapshots,
        }
    }

    pub fn store(&self) -> &Arc<ScheduleStore> {
        &self.store
    }

    pub fn filter(&self) -> &VisibilityFilter {
        &self.filter
    }

    pub fn preferences(&self) -> &ColorPreferences<R> {
        &self.preferences
    }

    /// Receiver of every store the board publishes, starting with the current one.
    pub fn snapshots(&self) -> watch::Receiver<Arc<ScheduleStore>> {
        self.snapshots.subscribe()
    }

    /// Change one person's color and persist the full color map.
    ///
    /// Returns `false` and leaves everything untouched when `name` is not in
    /// the store.
    pub fn set_color(&mut self, name: &str, color: impl Into<Color>) -> bool {
        if !self.store.contains(name) {
            log::debug!("Color edit for unknown person '{}' ignored", name);
            return false;
        }

        let color = color.into();
        log::debug!("Setting color of '{}' to {}", name, color);
        self.store = Arc::new(self.store.set_color(name, color));
        self.snapshots.send_replace(Arc::clone(&self.store));
        self.preferences.save(&self.store);
        true
    }

    /// Flip one person's visibility. Names not in the store are ignored.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.store.contains(name) {
            log::debug!("Visibility toggle for unknown person '{}' ignored", name);
            return false;
        }
        self.filter.toggle(name);
        true
    }

    /// Show only the given persons; names not in the store are skipped.
    pub fn show_only<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let store = &self.store;
        self.filter = VisibilityFilter::from_names(names.into_iter().filter(|n| store.contains(n)));
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.filter.contains(name)
    }

    pub fn slot(&self, day: Weekday, hour_slot: TimeOfDay) -> RenderedSlot {
        active_in_slot(&self.store, &self.filter, day, hour_slot)
    }

    pub fn week(&self, spec: &GridSpec) -> WeekGrid {
        render_week(&self.store, &self.filter, spec)
    }

    /// Everyone in class at `now`, regardless of the visibility filter.
    ///
    /// Presence is computed over the full store, so a person hidden from the
    /// grid still shows up here while in class. The same holds for
    /// [`start_presence`](Self::start_presence).
    pub fn currently_active(&self, now: &NaiveDateTime) -> Vec<String> {
        presence::currently_active(&self.store, now)
    }

    /// Start a presence ticker that follows this board's store.
    pub fn start_presence<C>(&self, clock: C, period: Duration) -> PresenceTicker
    where
        C: Clock + 'static,
    {
        PresenceTicker::spawn(self.snapshots(), clock, period)
    }
}
