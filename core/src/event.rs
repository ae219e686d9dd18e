// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::fmt::{self, Display};

use chrono::Weekday;

/// Number of working days covered by a week column set, Monday to Friday.
pub const DAYS_PER_WEEK: u8 = 5;

/// Hours on the vertical axis of a time grid.
pub const HOURS_PER_DAY: f64 = 24.0;

/// A calendar event placed on a working week.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalendarEvent {
    /// Caller-assigned identifier, unique within an [`EventSet`].
    pub id: u32,

    /// Display title.
    pub title: String,

    /// Start of the event in hours since midnight, `9.5` is 09:30.
    pub start_hour: f64,

    /// Length of the event in hours.
    pub duration: f64,

    /// Working day of the anchor week, `0` is Monday and `4` is Friday.
    pub day_index: u8,

    /// Style token, opaque to the layout engine.
    #[serde(default)]
    pub color: ColorTag,
}

impl CalendarEvent {
    /// The hour at which the event ends. May exceed 24.
    pub fn end_hour(&self) -> f64 {
        self.start_hour + self.duration
    }

    /// The weekday this event belongs to, if the day index is in range.
    pub fn weekday(&self) -> Option<Weekday> {
        (self.day_index < DAYS_PER_WEEK).then(|| weekday_of(self.day_index))
    }

    /// Whether two events share part of the same time range on the same day.
    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        self.day_index == other.day_index
            && self.start_hour < other.end_hour()
            && other.start_hour < self.end_hour()
    }

    /// Checks the field constraints of a single event.
    pub fn validate(&self) -> Result<(), EventError> {
        if !self.start_hour.is_finite() || !(0.0..HOURS_PER_DAY).contains(&self.start_hour) {
            return Err(EventError::StartHourOutOfRange {
                id: self.id,
                start_hour: self.start_hour,
            });
        }

        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(EventError::NonPositiveDuration {
                id: self.id,
                duration: self.duration,
            });
        }

        if self.day_index >= DAYS_PER_WEEK {
            return Err(EventError::DayIndexOutOfRange {
                id: self.id,
                day_index: self.day_index,
            });
        }

        Ok(())
    }
}

/// Maps a working day index to its weekday, wrapping after Friday.
pub fn weekday_of(day_index: u8) -> Weekday {
    match day_index % DAYS_PER_WEEK {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        _ => Weekday::Fri,
    }
}

/// Opaque style token attached to an event, e.g. `"blue"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorTag(String);

impl ColorTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, ordered collection of events.
///
/// The order of insertion is kept, and it is the render order of every view.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct EventSet {
    events: Vec<CalendarEvent>,
}

impl EventSet {
    /// Validates every event and the uniqueness of their identifiers.
    pub fn new(events: Vec<CalendarEvent>) -> Result<Self, EventError> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            event.validate()?;
            if !seen.insert(event.id) {
                return Err(EventError::DuplicateId(event.id));
            }
        }
        Ok(Self { events })
    }

    /// Parses an events file, a TOML document with an `[[events]]` array.
    pub fn from_toml(content: &str) -> Result<Self, EventError> {
        #[derive(serde::Deserialize)]
        struct EventsFile {
            #[serde(default)]
            events: Vec<CalendarEvent>,
        }

        let file: EventsFile =
            toml::from_str(content).map_err(|e| EventError::Parse(e.to_string()))?;
        Self::new(file.events)
    }

    pub fn as_slice(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn get(&self, id: u32) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a CalendarEvent;
    type IntoIter = std::slice::Iter<'a, CalendarEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Errors raised when an event or an event set breaks its constraints.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventError {
    #[error("event #{id}: start hour {start_hour} is outside [0, 24)")]
    StartHourOutOfRange { id: u32, start_hour: f64 },

    #[error("event #{id}: duration {duration} must be a positive number of hours")]
    NonPositiveDuration { id: u32, duration: f64 },

    #[error("event #{id}: day index {day_index} is outside Monday..Friday (0..=4)")]
    DayIndexOutOfRange { id: u32, day_index: u8 },

    #[error("duplicate event id #{0}")]
    DuplicateId(u32),

    #[error("failed to parse events file: {0}")]
    Parse(String),
}

/// The demo week shown when no events file is configured.
pub fn sample_events() -> EventSet {
    let event = |id, title: &str, start_hour, duration, day_index, color: &str| CalendarEvent {
        id,
        title: title.to_string(),
        start_hour,
        duration,
        day_index,
        color: ColorTag::new(color),
    };

    EventSet {
        events: vec![
            event(1, "Sprint Planning", 10.0, 1.5, 0, "blue"),
            event(2, "Design Review", 14.0, 1.0, 1, "purple"),
            event(3, "Client Meeting", 11.0, 1.0, 2, "red"),
            event(4, "Team Sync", 9.5, 0.5, 3, "green"),
            event(5, "Demo", 16.0, 1.0, 4, "yellow"),
        ],
    }
}
