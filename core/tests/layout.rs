// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end layout scenarios over the public API.

use chrono::NaiveDate;
use teamcal_core::{
    CalendarEvent, CalendarView, ColorTag, EventSet, Layout, LayoutParams, ViewMode,
};

fn event(id: u32, title: &str, start_hour: f64, duration: f64, day_index: u8) -> CalendarEvent {
    CalendarEvent {
        id,
        title: title.to_string(),
        start_hour,
        duration,
        day_index,
        color: ColorTag::new("blue"),
    }
}

fn first_week_of_2026() -> LayoutParams {
    LayoutParams::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
}

#[test]
fn sprint_planning_in_week_and_month_views() {
    let events = EventSet::new(vec![event(1, "Sprint Planning", 10.0, 1.5, 0)]).unwrap();
    let params = first_week_of_2026();
    let mut view = CalendarView::default();

    let Layout::Week(week) = view.layout(&events, &params) else {
        panic!("expected the week view first");
    };
    let monday = week.column(0).unwrap();
    assert_eq!(monday.placements.len(), 1);
    assert_eq!(monday.placements[0].geometry.top, 600.0);
    assert_eq!(monday.placements[0].geometry.height, 90.0);
    assert!((1..5).all(|i| week.column(i).unwrap().is_empty()));

    view.select(ViewMode::Month);
    let Layout::Month(month) = view.layout(&events, &params) else {
        panic!("expected the month view");
    };
    let cells: Vec<_> = month.cells().filter(|c| !c.events.is_empty()).collect();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].day, 5);
    assert_eq!(cells[0].events[0].id, 1);
}

#[test]
fn same_start_on_wednesday_overlaps_in_input_order() {
    let events = EventSet::new(vec![
        event(1, "Client Meeting", 9.0, 1.0, 2),
        event(2, "Vendor Call", 9.0, 0.5, 2),
    ])
    .unwrap();
    let Layout::Week(week) = CalendarView::default().layout(&events, &first_week_of_2026()) else {
        panic!("expected the week view");
    };

    let wednesday = week.column(2).unwrap();
    let ids: Vec<_> = wednesday.placements.iter().map(|p| p.event.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(wednesday.placements[0].geometry.top, 540.0);
    assert_eq!(wednesday.placements[1].geometry.top, 540.0);
    assert_ne!(
        wednesday.placements[0].geometry.height,
        wednesday.placements[1].geometry.height
    );
}

#[test]
fn unvalidated_events_degrade_without_failing() {
    let events = vec![event(1, "Late", 23.0, 4.0, 1), event(2, "Weird", -1.0, 1.0, 1)];
    let mut view = CalendarView::default();
    view.select(ViewMode::Day);
    view.select_day(1);
    let Layout::Day(day) = view.layout_slice(&events, &first_week_of_2026()) else {
        panic!("expected the day view");
    };
    assert_eq!(day.placements[0].geometry.top, 1380.0);
    assert_eq!(day.placements[0].geometry.bottom(), 1620.0);
    assert_eq!(day.placements[1].geometry.top, -60.0);
}
