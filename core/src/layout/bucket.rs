// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::CalendarEvent;
use crate::event::DAYS_PER_WEEK;
use crate::layout::{Geometry, Lane, TimeGrid, assign_lanes};

/// Events whose day index matches, in input order.
pub fn bucket_day(events: &[CalendarEvent], day_index: u8) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.day_index == day_index).collect()
}

/// One bucket per working day, Monday first.
pub fn bucket_week(events: &[CalendarEvent]) -> Vec<Vec<&CalendarEvent>> {
    (0..DAYS_PER_WEEK).map(|i| bucket_day(events, i)).collect()
}

/// Where an event is drawn inside its day column.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Placement<'a> {
    pub event: &'a CalendarEvent,

    #[serde(flatten)]
    pub geometry: Geometry,

    pub lane: Lane,
}

/// A single day column.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DayLayout<'a> {
    pub day_index: u8,
    pub placements: Vec<Placement<'a>>,
}

impl<'a> DayLayout<'a> {
    /// Lays out the events of one day. Placements keep input order, so
    /// overlapping blocks keep their stacking order too.
    pub fn build(events: &'a [CalendarEvent], day_index: u8, grid: &TimeGrid) -> Self {
        Self::from_bucket(bucket_day(events, day_index), day_index, grid)
    }

    fn from_bucket(bucket: Vec<&'a CalendarEvent>, day_index: u8, grid: &TimeGrid) -> Self {
        let lanes = assign_lanes(&bucket);
        let placements = bucket
            .into_iter()
            .zip(lanes)
            .map(|(event, lane)| Placement {
                event,
                geometry: grid.geometry(event.start_hour, event.duration),
                lane,
            })
            .collect();

        Self {
            day_index,
            placements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Five day columns, Monday to Friday.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeekLayout<'a> {
    pub columns: Vec<DayLayout<'a>>,
}

impl<'a> WeekLayout<'a> {
    pub fn build(events: &'a [CalendarEvent], grid: &TimeGrid) -> Self {
        let columns = (0..DAYS_PER_WEEK)
            .zip(bucket_week(events))
            .map(|(i, bucket)| DayLayout::from_bucket(bucket, i, grid))
            .collect();
        Self { columns }
    }

    pub fn column(&self, day_index: u8) -> Option<&DayLayout<'a>> {
        self.columns.get(usize::from(day_index))
    }

    /// Number of placed events across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.placements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
