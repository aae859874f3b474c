// ============================================================================
// Class schedule records and dataset loading
// ============================================================================
//
// The dataset is a JSON array of person schedules. Field names are accepted
// either in English (snake_case or camelCase) or in Spanish, so existing
// `horarios.json` exports load unchanged.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use super::time::{TimeOfDay, Weekday};

/// Display color of a person: a hex triplet or a named CSS color.
///
/// The value is carried verbatim; no format validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One recurring weekly class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    #[serde(alias = "dia")]
    pub day: Weekday,
    #[serde(alias = "materia")]
    pub subject: String,
    #[serde(alias = "startTime", alias = "horaInicio")]
    pub start_time: TimeOfDay,
    #[serde(alias = "endTime", alias = "horaFin")]
    pub end_time: TimeOfDay,
    #[serde(default, alias = "profesor")]
    pub instructor: Option<String>,
    #[serde(default, alias = "aula")]
    pub room: Option<String>,
}

impl ClassSession {
    /// `true` when the interval is non-empty and does not wrap midnight.
    pub fn is_well_formed(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Length of the session in minutes, zero for malformed intervals.
    pub fn duration_minutes(&self) -> u32 {
        self.end_time
            .minutes_since_midnight()
            .saturating_sub(self.start_time.minutes_since_midnight())
    }
}

/// A person's weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSchedule {
    #[serde(alias = "nombre")]
    pub name: String,
    pub color: Color,
    #[serde(default, alias = "clases")]
    pub sessions: Vec<ClassSession>,
}

impl PersonSchedule {
    /// Copy of this schedule carrying a different color.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }
}

/// Parse a dataset from a JSON string.
///
/// Rejects duplicate person names: the name is the join key for color
/// preferences and for the visibility filter. Sessions whose start is not
/// before their end are kept (they never match any slot) but reported.
pub fn parse_dataset_json_str(json: &str) -> Result<Vec<PersonSchedule>> {
    let schedules: Vec<PersonSchedule> =
        serde_json::from_str(json).context("Failed to deserialize schedule dataset")?;

    let mut seen = HashSet::new();
    for schedule in &schedules {
        if !seen.insert(schedule.name.as_str()) {
            anyhow::bail!("Duplicate person name in dataset: '{}'", schedule.name);
        }
        for session in schedule.sessions.iter().filter(|s| !s.is_well_formed()) {
            log::warn!(
                "Session '{}' of '{}' on {} has an empty or inverted interval ({} - {}); it will never be shown",
                session.subject,
                schedule.name,
                session.day,
                session.start_time,
                session.end_time
            );
        }
    }

    log::debug!("Parsed dataset with {} person schedules", schedules.len());
    Ok(schedules)
}

/// Load a dataset from a JSON file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<PersonSchedule>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
    parse_dataset_json_str(&content)
        .with_context(|| format!("Invalid dataset file {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
