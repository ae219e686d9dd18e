// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::CalendarEvent;

/// Rows shown even when a month fits in four weeks, so the grid keeps its shape.
const MIN_WEEKS: usize = 5;

/// The first column of a week row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// The seven weekdays in column order.
    pub fn weekdays(self) -> [Weekday; 7] {
        let mut day = self.weekday();
        std::array::from_fn(|_| {
            let current = day;
            day = day.succ();
            current
        })
    }

    /// Column of a weekday in a row starting at this day.
    fn column_of(self, weekday: Weekday) -> u64 {
        match self {
            WeekStart::Sunday => u64::from(weekday.num_days_from_sunday()),
            WeekStart::Monday => u64::from(weekday.num_days_from_monday()),
        }
    }
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// A day cell of the month grid.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,

    /// Day of month shown in the cell.
    pub day: u32,

    /// The cell belongs to the previous or the next month.
    pub is_adjacent_month: bool,

    /// Events on this date, in input order.
    pub events: Vec<&'a CalendarEvent>,
}

/// Calendar month laid out in week rows of seven cells.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub week_start: WeekStart,
    pub weeks: Vec<[MonthCell<'a>; 7]>,
}

impl<'a> MonthGrid<'a> {
    /// Builds the grid for the month containing `date`.
    ///
    /// `anchor` is the Monday of the week the events' day indices refer to:
    /// an event with `day_index = k` falls on `anchor + k` days. Events whose
    /// date is not on the grid are left out.
    pub fn build(
        date: NaiveDate,
        week_start: WeekStart,
        anchor: NaiveDate,
        events: &'a [CalendarEvent],
    ) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);

        let lead = week_start.column_of(first.weekday());
        let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
        let trail = 6 - week_start.column_of(last.weekday());
        let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

        let span = (end - start).num_days() + 1;
        let weeks = usize::try_from(span / 7).unwrap_or(0).max(MIN_WEEKS);

        let event_dates: Vec<_> = events
            .iter()
            .map(|e| anchor.checked_add_days(Days::new(u64::from(e.day_index))))
            .collect();

        let mut current = start;
        let weeks: Vec<[MonthCell<'a>; 7]> = (0..weeks)
            .map(|_| {
                std::array::from_fn(|_| {
                    let cell_date = current;
                    current = current.succ_opt().unwrap_or(current);
                    MonthCell {
                        date: cell_date,
                        day: cell_date.day(),
                        is_adjacent_month: cell_date.year() != first.year()
                            || cell_date.month() != first.month(),
                        events: events
                            .iter()
                            .zip(&event_dates)
                            .filter(|(_, d)| **d == Some(cell_date))
                            .map(|(e, _)| e)
                            .collect(),
                    }
                })
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            week_start,
            weeks,
        }
    }

    /// Builds the grid for `year-month`, `None` if the month does not exist.
    pub fn for_month(
        year: i32,
        month: u32,
        week_start: WeekStart,
        anchor: NaiveDate,
        events: &'a [CalendarEvent],
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self::build(first, week_start, anchor, events))
    }

    pub fn cells(&self) -> impl Iterator<Item = &MonthCell<'a>> {
        self.weeks.iter().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell<'a>> {
        self.cells().find(|c| c.date == date)
    }
}
