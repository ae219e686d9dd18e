// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use chrono::NaiveDate;
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use teamcal_core::{CalendarView, EventSet, Layout, LayoutParams, Teamcal, ViewMode};
use tokio::fs;

use crate::grid_formatter::GridFormatter;
use crate::month_formatter::MonthFormatter;
use crate::placement_formatter::PlacementFormatter;
use crate::util::{OutputFormat, parse_date, parse_month};

#[derive(Debug, Clone)]
pub struct CmdCalendar {
    pub view: Option<ViewMode>,
    pub day: Option<u8>,
    pub week: Option<NaiveDate>,
    pub month: Option<NaiveDate>,
    pub events: Option<PathBuf>,
    pub output_format: OutputFormat,
}

impl Default for CmdCalendar {
    fn default() -> Self {
        Self {
            view: None,
            day: None,
            week: None,
            month: None,
            events: None,
            output_format: OutputFormat::Grid,
        }
    }
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Show the calendar in day, week or month view")
            .arg(
                arg!(--view <VIEW> "View to show, defaults to the configured view")
                    .value_parser(value_parser!(ViewMode)),
            )
            .arg(
                arg!(--day <DAY> "Day column of the day view, 0 is Monday")
                    .value_parser(value_parser!(u8).range(0..5)),
            )
            .arg(
                arg!(--week <DATE> "Any date in the week to show, defaults to today")
                    .value_parser(parse_date),
            )
            .arg(
                arg!(--month <MONTH> "Month shown by the month view, as YYYY-MM")
                    .value_parser(parse_month),
            )
            .arg(
                arg!(--events <FILE> "TOML file with the events to show")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            view: matches.get_one("view").copied(),
            day: matches.get_one("day").copied(),
            week: matches.get_one("week").copied(),
            month: matches.get_one("month").copied(),
            events: matches.get_one("events").cloned(),
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, teamcal: &mut Teamcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing calendar...");

        if let Some(path) = &self.events {
            let content = fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read events file {}: {e}", path.display()))?;
            teamcal.set_events(EventSet::from_toml(&content)?);
        }

        let mode = self.view.unwrap_or(teamcal.config().default_view);
        let mut view = CalendarView::new(mode);
        if let Some(day) = self.day {
            view.select_day(day);
        }

        let params = self.layout_params(teamcal);
        let layout = view.layout(teamcal.events(), &params);
        println!("{}", render(&layout, &params, self.output_format)?);
        Ok(())
    }

    fn layout_params(&self, teamcal: &Teamcal) -> LayoutParams {
        let mut params = teamcal.layout_params(self.week);
        if let Some(month) = self.month {
            params.month = month;
        }
        params
    }
}

/// Renders a layout in the requested output format.
pub fn render(
    layout: &Layout<'_>,
    params: &LayoutParams,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(layout)?);
    }

    let out = match (layout, format) {
        (Layout::Day(day), OutputFormat::Table) => PlacementFormatter::new(params.anchor)
            .format(&day.placements)
            .to_string(),
        (Layout::Week(week), OutputFormat::Table) => {
            let placements: Vec<_> = week
                .columns
                .iter()
                .flat_map(|c| c.placements.iter().cloned())
                .collect();
            PlacementFormatter::new(params.anchor)
                .format(&placements)
                .to_string()
        }
        (Layout::Day(day), _) => GridFormatter::new(params)
            .format(std::slice::from_ref(day))
            .to_string(),
        (Layout::Week(week), _) => GridFormatter::new(params)
            .format(&week.columns)
            .to_string(),
        (Layout::Month(month), _) => MonthFormatter::new(format).format(month).to_string(),
    };

    Ok(format!("{}\n{out}", view_switcher(layout.mode())))
}

/// The view switcher line, with the current view highlighted.
fn view_switcher(mode: ViewMode) -> String {
    let items: Vec<String> = ViewMode::ALL
        .iter()
        .map(|&m| match m == mode {
            true => format!("[{}]", m.label()).bold().to_string(),
            false => format!(" {} ", m.label()).dimmed().to_string(),
        })
        .collect();
    items.join(" ")
}
