// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;

use crate::layout::{DayLayout, MonthGrid, NowIndicator, TimeGrid, WeekLayout, WeekStart};
use crate::{CalendarEvent, EventSet};

/// Which calendar view is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// A single day column.
    Day,

    /// Five day columns, Monday to Friday.
    #[default]
    Week,

    /// A month grid.
    Month,
}

const VIEW_DAY: &str = "day";
const VIEW_WEEK: &str = "week";
const VIEW_MONTH: &str = "month";

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    /// Label shown on the view switcher.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        }
    }
}

impl AsRef<str> for ViewMode {
    fn as_ref(&self) -> &str {
        match self {
            ViewMode::Day => VIEW_DAY,
            ViewMode::Week => VIEW_WEEK,
            ViewMode::Month => VIEW_MONTH,
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            VIEW_DAY => Ok(ViewMode::Day),
            VIEW_WEEK => Ok(ViewMode::Week),
            VIEW_MONTH => Ok(ViewMode::Month),
            _ => Err(format!("Invalid view mode: {value}")),
        }
    }
}

/// Grid parameters shared by all views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Vertical scale of the day and week grids.
    pub grid: TimeGrid,

    /// Monday of the week that event day indices refer to.
    pub anchor: NaiveDate,

    /// Any date in the month shown by the month view.
    pub month: NaiveDate,

    /// First column of the month grid.
    pub week_start: WeekStart,

    /// The static current-time line.
    pub now_indicator: NowIndicator,
}

impl LayoutParams {
    /// Parameters for the week starting on `anchor`, showing its month.
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            grid: TimeGrid::default(),
            anchor,
            month: anchor,
            week_start: WeekStart::default(),
            now_indicator: NowIndicator::default(),
        }
    }
}

/// The output of a view, ready to be drawn.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Layout<'a> {
    Day(DayLayout<'a>),
    Week(WeekLayout<'a>),
    Month(MonthGrid<'a>),
}

impl Layout<'_> {
    pub fn mode(&self) -> ViewMode {
        match self {
            Layout::Day(_) => ViewMode::Day,
            Layout::Week(_) => ViewMode::Week,
            Layout::Month(_) => ViewMode::Month,
        }
    }
}

/// View mode selector of the calendar.
///
/// Any mode can switch to any other. Switching only changes which layout is
/// computed, the events are never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarView {
    mode: ViewMode,
    selected_day: u8,
}

impl CalendarView {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            selected_day: 0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Day column shown by the day view, `0` is Monday.
    pub fn selected_day(&self) -> u8 {
        self.selected_day
    }

    pub fn select(&mut self, mode: ViewMode) {
        tracing::debug!(from = %self.mode, to = %mode, "switching view");
        self.mode = mode;
    }

    pub fn select_day(&mut self, day_index: u8) {
        self.selected_day = day_index;
    }

    /// Computes the layout of the current view.
    pub fn layout<'a>(&self, events: &'a EventSet, params: &LayoutParams) -> Layout<'a> {
        self.layout_slice(events.as_slice(), params)
    }

    /// Same as [`CalendarView::layout`], for events that skipped validation.
    pub fn layout_slice<'a>(&self, events: &'a [CalendarEvent], params: &LayoutParams) -> Layout<'a> {
        match self.mode {
            ViewMode::Day => Layout::Day(DayLayout::build(events, self.selected_day, &params.grid)),
            ViewMode::Week => Layout::Week(WeekLayout::build(events, &params.grid)),
            ViewMode::Month => Layout::Month(MonthGrid::build(
                params.month,
                params.week_start,
                params.anchor,
                events,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_events;

    fn params() -> LayoutParams {
        LayoutParams::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    #[test]
    fn starts_in_week_mode() {
        let view = CalendarView::default();
        assert_eq!(view.mode(), ViewMode::Week);
        assert_eq!(view.selected_day(), 0);
    }

    #[test]
    fn switches_between_any_modes() {
        let mut view = CalendarView::default();
        for from in ViewMode::ALL {
            for to in ViewMode::ALL {
                view.select(from);
                view.select(to);
                assert_eq!(view.mode(), to);
            }
        }
    }

    #[test]
    fn round_trip_through_month_restores_week() {
        let events = sample_events();
        let params = params();
        let mut view = CalendarView::default();

        let before = view.layout(&events, &params);
        view.select(ViewMode::Month);
        let month = view.layout(&events, &params);
        assert_eq!(month.mode(), ViewMode::Month);
        view.select(ViewMode::Week);
        let after = view.layout(&events, &params);

        assert_eq!(before, after);
        assert_eq!(events, sample_events());
    }

    #[test]
    fn day_view_defaults_to_monday() {
        let events = sample_events();
        let view = CalendarView::new(ViewMode::Day);
        match view.layout(&events, &params()) {
            Layout::Day(day) => {
                assert_eq!(day.day_index, 0);
                assert_eq!(day.placements.len(), 1);
                assert_eq!(day.placements[0].event.title, "Sprint Planning");
            }
            other => panic!("expected day layout, got {:?}", other.mode()),
        }
    }

    #[test]
    fn day_view_follows_selected_day() {
        let events = sample_events();
        let mut view = CalendarView::new(ViewMode::Day);
        view.select_day(3);
        match view.layout(&events, &params()) {
            Layout::Day(day) => {
                assert_eq!(day.day_index, 3);
                assert_eq!(day.placements[0].event.title, "Team Sync");
                assert_eq!(day.placements[0].geometry.top, 570.0);
            }
            other => panic!("expected day layout, got {:?}", other.mode()),
        }
    }

    #[test]
    fn parses_view_mode() {
        assert_eq!("day".parse::<ViewMode>(), Ok(ViewMode::Day));
        assert_eq!("Week".parse::<ViewMode>(), Ok(ViewMode::Week));
        assert_eq!("MONTH".parse::<ViewMode>(), Ok(ViewMode::Month));
        assert!("year".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Month.to_string(), "month");
        assert_eq!(ViewMode::Month.label(), "Month");
    }

    #[test]
    fn serializes_layout_with_view_tag() {
        let events = sample_events();
        let view = CalendarView::new(ViewMode::Month);
        let json = serde_json::to_value(view.layout(&events, &params())).unwrap();
        assert_eq!(json["view"], "month");
        assert_eq!(json["year"], 2026);
        assert_eq!(json["weeks"][1][1]["day"], 5);
        assert_eq!(json["weeks"][1][1]["events"][0]["title"], "Sprint Planning");
    }
}
