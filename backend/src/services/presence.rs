//! Live presence: who is in class right now.
//!
//! [`currently_active`] is the pure query. [`PresenceTicker`] re-runs it on a
//! fixed period (once a minute by default, matching the minute resolution of
//! session times) and publishes the result on a `watch` channel. The ticker
//! is the cancellation handle: dropping it stops the background task, so a
//! view owns exactly one ticker for as long as it is open.

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::{format_time, is_active, weekday_of};
use crate::services::store::ScheduleStore;

/// Default recomputation period.
pub const DEFAULT_TICK: Duration = Duration::from_secs(60);

/// Shortest period a ticker runs at; shorter requests are raised to this.
pub const MIN_TICK: Duration = Duration::from_secs(1);

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A settable clock for tests and replays. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// Names of persons with at least one session running at `now`.
///
/// Store order, each name at most once.
pub fn currently_active(store: &ScheduleStore, now: &NaiveDateTime) -> Vec<String> {
    let day = weekday_of(now);
    let time = format_time(now);
    store
        .persons()
        .iter()
        .filter(|person| person.sessions.iter().any(|s| is_active(s, day, time)))
        .map(|person| person.name.clone())
        .collect()
}

/// Handle to a running presence recomputation task.
pub struct PresenceTicker {
    handle: JoinHandle<()>,
    updates: watch::Receiver<Vec<String>>,
}

impl PresenceTicker {
    /// Start recomputing presence every `period`.
    ///
    /// The first result is computed synchronously, so [`current`](Self::current)
    /// is meaningful as soon as this returns. Each tick reads the latest store
    /// snapshot from `snapshots`. A `period` below [`MIN_TICK`] (including
    /// zero) runs at [`MIN_TICK`]. Must be called from within a tokio runtime.
    pub fn spawn<C>(
        snapshots: watch::Receiver<Arc<ScheduleStore>>,
        clock: C,
        period: Duration,
    ) -> Self
    where
        C: Clock + 'static,
    {
        let initial = {
            let store = snapshots.borrow();
            currently_active(&store, &clock.now())
        };
        if period < MIN_TICK {
            log::warn!(
                "Presence period {:?} is below the minimum, using {:?}",
                period,
                MIN_TICK
            );
        }
        let period = period.max(MIN_TICK);
        log::debug!("Presence ticker started with {} active", initial.len());
        let (tx, updates) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; that result was computed above.
            interval.tick().await;

            loop {
                interval.tick().await;
                let store = Arc::clone(&snapshots.borrow());
                let names = currently_active(&store, &clock.now());
                tx.send_if_modified(|current| {
                    if *current == names {
                        return false;
                    }
                    log::debug!("Presence changed: {:?}", names);
                    *current = names;
                    true
                });
            }
        });

        Self { handle, updates }
    }

    /// Latest computed name list.
    pub fn current(&self) -> Vec<String> {
        self.updates.borrow().clone()
    }

    /// Receiver that is notified whenever the name list changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.updates.clone()
    }

    /// Stop the background task.
    pub fn stop(self) {
        // Drop aborts the task.
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PresenceTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
