// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use chrono::{Days, NaiveDate};
use colored::Color;
use teamcal_core::layout::{Placement, format_hour};
use teamcal_core::{ColorTag, weekday_of};

use crate::table::{PaddingDirection, Table, TableColumn};

/// Lists the placements of a day or week layout as a table.
#[derive(Debug)]
pub struct PlacementFormatter {
    columns: Vec<PlacementColumn>,
}

impl PlacementFormatter {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            columns: vec![
                PlacementColumn::Id,
                PlacementColumn::Day { anchor },
                PlacementColumn::TimeSpan,
                PlacementColumn::Top,
                PlacementColumn::Height,
                PlacementColumn::Lane,
                PlacementColumn::Title,
            ],
        }
    }

    pub fn format<'a, 'p>(&'a self, placements: &'a [Placement<'p>]) -> Display<'a, 'p> {
        Display {
            placements,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, 'p> {
    placements: &'a [Placement<'p>],
    formatter: &'a PlacementFormatter,
}

impl fmt::Display for Display<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.placements.is_empty() {
            return write!(f, "No events");
        }

        let table = Table::new(&self.formatter.columns, self.placements).with_header(true);
        write!(f, "{table}")
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PlacementColumn {
    Id,
    Day { anchor: NaiveDate },
    TimeSpan,
    Top,
    Height,
    Lane,
    Title,
}

impl<'p> TableColumn<Placement<'p>> for PlacementColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            PlacementColumn::Id => "ID",
            PlacementColumn::Day { .. } => "Day",
            PlacementColumn::TimeSpan => "Time",
            PlacementColumn::Top => "Top",
            PlacementColumn::Height => "Height",
            PlacementColumn::Lane => "Lane",
            PlacementColumn::Title => "Title",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Placement<'p>) -> Cow<'a, str> {
        let event = data.event;
        match self {
            PlacementColumn::Id => event.id.to_string().into(),
            PlacementColumn::Day { anchor } => format_day(*anchor, event.day_index).into(),
            PlacementColumn::TimeSpan => format!(
                "{}~{}",
                format_hour(event.start_hour),
                format_hour(event.end_hour())
            )
            .into(),
            PlacementColumn::Top => format_px(data.geometry.top).into(),
            PlacementColumn::Height => format_px(data.geometry.height).into(),
            PlacementColumn::Lane => format!("{}/{}", data.lane.index + 1, data.lane.count).into(),
            PlacementColumn::Title => event.title.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            PlacementColumn::Id | PlacementColumn::Top | PlacementColumn::Height => {
                PaddingDirection::Right
            }
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &Placement<'p>) -> Option<Color> {
        match self {
            PlacementColumn::Title => color_of(&data.event.color),
            _ => None,
        }
    }
}

/// Terminal color for an event color tag, if it names one.
pub fn color_of(tag: &ColorTag) -> Option<Color> {
    tag.as_str().parse().ok()
}

/// Short day header such as `Mon 5`.
pub fn format_day(anchor: NaiveDate, day_index: u8) -> String {
    match anchor.checked_add_days(Days::new(u64::from(day_index))) {
        Some(date) => date.format("%a %-d").to_string(),
        None => weekday_of(day_index).to_string(),
    }
}

fn format_px(px: f64) -> String {
    if px.fract() == 0.0 {
        format!("{px:.0}")
    } else {
        format!("{px:.1}")
    }
}
