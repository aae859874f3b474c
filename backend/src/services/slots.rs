//! Slot indexer: which sessions occupy a (day, hour) cell of the grid.

use serde::Serialize;

use crate::models::{is_active, ClassSession, Color, TimeOfDay, Weekday};
use crate::services::filter::VisibilityFilter;
use crate::services::layout::{layout_for, SlotLayout};
use crate::services::store::ScheduleStore;

/// A session placed in a slot together with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEntry {
    pub session: ClassSession,
    pub person: String,
    pub color: Color,
}

/// Sessions active in one grid cell, in store order then session order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlot {
    pub day: Weekday,
    pub hour_slot: TimeOfDay,
    pub active_sessions: Vec<SlotEntry>,
}

impl RenderedSlot {
    pub fn len(&self) -> usize {
        self.active_sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_sessions.is_empty()
    }

    /// Sub-grid shape for this slot's session count.
    pub fn layout(&self) -> SlotLayout {
        layout_for(self.len())
    }
}

/// Collect the sessions of visible persons that are running at `hour_slot` on `day`.
///
/// The order is stable across calls: persons in store order, then each
/// person's sessions in dataset order. A person with two overlapping
/// sessions contributes both.
pub fn active_in_slot(
    store: &ScheduleStore,
    filter: &VisibilityFilter,
    day: Weekday,
    hour_slot: TimeOfDay,
) -> RenderedSlot {
    let active_sessions = store
        .persons()
        .iter()
        .filter(|person| filter.contains(&person.name))
        .flat_map(|person| {
            person
                .sessions
                .iter()
                .filter(move |session| is_active(session, day, hour_slot))
                .map(move |session| SlotEntry {
                    session: session.clone(),
                    person: person.name.clone(),
                    color: person.color.clone(),
                })
        })
        .collect();

    RenderedSlot {
        day,
        hour_slot,
        active_sessions,
    }
}
