//! Weekly grid assembled from per-cell slot queries.
//!
//! The grid is a convenience for consumers that draw the whole week at once;
//! every cell is still computed by [`active_in_slot`] and can be requested
//! on its own.

use serde::{Deserialize, Serialize};

use crate::models::{TimeOfDay, Weekday};
use crate::services::filter::VisibilityFilter;
use crate::services::layout::SlotLayout;
use crate::services::slots::{active_in_slot, RenderedSlot};
use crate::services::store::ScheduleStore;

/// Shape of the weekly grid: which day columns and which hourly rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(default = "default_days")]
    pub days: Vec<Weekday>,
    #[serde(default = "default_first_hour")]
    pub first_hour: u8,
    #[serde(default = "default_hour_count")]
    pub hour_count: u8,
}

fn default_days() -> Vec<Weekday> {
    Weekday::TEACHING_DAYS.to_vec()
}

fn default_first_hour() -> u8 {
    7
}

fn default_hour_count() -> u8 {
    15
}

impl Default for GridSpec {
    /// Monday–Saturday, 07:00 through 21:00.
    fn default() -> Self {
        Self {
            days: default_days(),
            first_hour: default_first_hour(),
            hour_count: default_hour_count(),
        }
    }
}

impl GridSpec {
    /// Row keys (`HH:00`), clipped at 23:00.
    pub fn hour_slots(&self) -> Vec<TimeOfDay> {
        (0..self.hour_count)
            .filter_map(|offset| self.first_hour.checked_add(offset))
            .map_while(TimeOfDay::on_the_hour)
            .collect()
    }
}

/// One rendered cell with its sub-grid shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub slot: RenderedSlot,
    pub layout: SlotLayout,
}

/// One hour across every day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub hour_slot: TimeOfDay,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    pub days: Vec<Weekday>,
    pub rows: Vec<GridRow>,
}

impl WeekGrid {
    /// Cell at `(day, hour_slot)`, if both are part of the grid.
    pub fn cell(&self, day: Weekday, hour_slot: TimeOfDay) -> Option<&GridCell> {
        let column = self.days.iter().position(|d| *d == day)?;
        self.rows
            .iter()
            .find(|row| row.hour_slot == hour_slot)
            .and_then(|row| row.cells.get(column))
    }

    /// Cells holding more than one session.
    pub fn conflicts(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.slot.len() > 1)
    }
}

/// Compute every cell of the grid described by `spec`.
pub fn render_week(store: &ScheduleStore, filter: &VisibilityFilter, spec: &GridSpec) -> WeekGrid {
    let rows = spec
        .hour_slots()
        .into_iter()
        .map(|hour_slot| GridRow {
            hour_slot,
            cells: spec
                .days
                .iter()
                .map(|day| {
                    let slot = active_in_slot(store, filter, *day, hour_slot);
                    let layout = slot.layout();
                    GridCell { slot, layout }
                })
                .collect(),
        })
        .collect();

    WeekGrid {
        days: spec.days.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassSession, Color, PersonSchedule};
    use crate::services::layout::SizeTier;
    use crate::services::preferences::ColorPreferenceMap;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn three_at_nine() -> ScheduleStore {
        let raw: Vec<PersonSchedule> = ["Ana", "Bo", "Cy"]
            .iter()
            .map(|name| PersonSchedule {
                name: name.to_string(),
                color: Color::from("#444444"),
                sessions: vec![ClassSession {
                    day: Weekday::Monday,
                    subject: format!("{}'s class", name),
                    start_time: t("09:00"),
                    end_time: t("10:00"),
                    instructor: None,
                    room: None,
                }],
            })
            .collect();
        ScheduleStore::build(&raw, &ColorPreferenceMap::new())
    }

    #[test]
    fn test_default_spec_hours() {
        let hours = GridSpec::default().hour_slots();
        assert_eq!(hours.len(), 15);
        assert_eq!(hours.first().unwrap().to_string(), "07:00");
        assert_eq!(hours.last().unwrap().to_string(), "21:00");
    }

    #[test]
    fn test_hour_slots_clip_at_midnight() {
        let spec = GridSpec {
            days: vec![Weekday::Monday],
            first_hour: 20,
            hour_count: 10,
        };
        let hours: Vec<String> = spec.hour_slots().iter().map(|h| h.to_string()).collect();
        assert_eq!(hours, vec!["20:00", "21:00", "22:00", "23:00"]);
    }

    #[test]
    fn test_three_way_overlap_cell() {
        let store = three_at_nine();
        let grid = render_week(&store, &VisibilityFilter::all(&store), &GridSpec::default());

        assert_eq!(grid.rows.len(), 15);
        assert!(grid.rows.iter().all(|row| row.cells.len() == 6));

        let cell = grid.cell(Weekday::Monday, t("09:00")).unwrap();
        assert_eq!(cell.slot.len(), 3);
        assert_eq!((cell.layout.columns, cell.layout.rows), (2, 2));
        assert_eq!(cell.layout.size_tier, SizeTier::Medium);
        assert_eq!(grid.conflicts().count(), 1);

        assert!(grid.cell(Weekday::Monday, t("10:00")).unwrap().slot.is_empty());
        assert!(grid.cell(Weekday::Sunday, t("09:00")).is_none());
    }

    #[test]
    fn test_filter_applies_to_every_cell() {
        let store = three_at_nine();
        let filter = VisibilityFilter::from_names(["Cy"]);
        let grid = render_week(&store, &filter, &GridSpec::default());
        let cell = grid.cell(Weekday::Monday, t("09:00")).unwrap();
        assert_eq!(cell.slot.len(), 1);
        assert_eq!(cell.slot.active_sessions[0].person, "Cy");
        assert_eq!(grid.conflicts().count(), 0);
    }

    #[test]
    fn test_spec_from_toml_defaults() {
        let spec: GridSpec = toml::from_str("first_hour = 8").unwrap();
        assert_eq!(spec.first_hour, 8);
        assert_eq!(spec.hour_count, 15);
        assert_eq!(spec.days.len(), 6);
    }
}
