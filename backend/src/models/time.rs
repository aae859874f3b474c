use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::schedule::ClassSession;

/// Day of a recurring week.
///
/// Deserialization goes through [`FromStr`], so datasets and config files
/// accept the same tokens as the command line: English full or three-letter
/// names in any case and the Spanish names found in older datasets
/// (`"Lunes"`, `"Miércoles"`, ...). Serialization always emits the English
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All seven days, Sunday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Monday through Saturday, the columns of the class grid.
    pub const TEACHING_DAYS: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// English name of the day.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Parse a day token.
    ///
    /// Accepts English full or three-letter names in any case and the Spanish
    /// names with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" | "domingo" => Ok(Weekday::Sunday),
            "monday" | "mon" | "lunes" => Ok(Weekday::Monday),
            "tuesday" | "tue" | "martes" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" | "miércoles" | "miercoles" => Ok(Weekday::Wednesday),
            "thursday" | "thu" | "jueves" => Ok(Weekday::Thursday),
            "friday" | "fri" | "viernes" => Ok(Weekday::Friday),
            "saturday" | "sat" | "sábado" | "sabado" => Ok(Weekday::Saturday),
            _ => Err(format!("Unknown weekday: {}", s)),
        }
    }
}

impl TryFrom<String> for Weekday {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Wall-clock time at minute granularity.
///
/// The only textual form is the zero-padded `HH:MM`, so the derived ordering
/// on `(hour, minute)` matches the lexicographic order of the rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Create a time of day, rejecting out-of-range fields.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// The `HH:00` slot key for an hour of the grid.
    pub fn on_the_hour(hour: u8) -> Option<Self> {
        Self::new(hour, 0)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Parse `HH:MM` (or `H:MM`) into a normalized time of day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour, minute) = trimmed
            .split_once(':')
            .ok_or_else(|| format!("Invalid time '{}': expected HH:MM", s))?;

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
            return Err(format!("Invalid time '{}': expected HH:MM", s));
        }

        let hour: u8 = hour
            .parse()
            .map_err(|_| format!("Invalid hour in '{}'", s))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| format!("Invalid minute in '{}'", s))?;

        TimeOfDay::new(hour, minute).ok_or_else(|| format!("Time out of range: '{}'", s))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Weekday of a local wall-clock instant.
pub fn weekday_of(instant: &NaiveDateTime) -> Weekday {
    instant.weekday().into()
}

/// Truncate a local wall-clock instant to its minute.
pub fn format_time(instant: &NaiveDateTime) -> TimeOfDay {
    // chrono guarantees hour < 24 and minute < 60
    TimeOfDay {
        hour: instant.hour() as u8,
        minute: instant.minute() as u8,
    }
}

/// Whether `session` is running at `time` on `day`.
///
/// Intervals are half-open: a session is active at its start and inactive at
/// its end, so a 09:00–10:00 class shows in the 09:00 slot but not at 10:00.
pub fn is_active(session: &ClassSession, day: Weekday, time: TimeOfDay) -> bool {
    session.day == day && session.start_time <= time && time < session.end_time
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
