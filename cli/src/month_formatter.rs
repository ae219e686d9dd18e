// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use chrono::NaiveDate;
use colored::{Color, Colorize};
use teamcal_core::CalendarEvent;
use teamcal_core::layout::{MonthCell, MonthGrid, format_hour};

use crate::placement_formatter::color_of;
use crate::table::{Table, TableColumn};
use crate::util::{OutputFormat, pad_to_width, truncate_to_width};

const DEFAULT_CELL_WIDTH: usize = 14;
const MAX_EVENTS_PER_CELL: usize = 3;

#[derive(Debug)]
pub struct MonthFormatter {
    cell_width: usize,
    format: OutputFormat,
}

impl MonthFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            format,
        }
    }

    pub fn format<'a, 'g>(&'a self, grid: &'a MonthGrid<'g>) -> Display<'a, 'g> {
        Display {
            grid,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, 'g> {
    grid: &'a MonthGrid<'g>,
    formatter: &'a MonthFormatter,
}

impl fmt::Display for Display<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Table => self.fmt_table(f),
            _ => self.fmt_grid(f),
        }
    }
}

impl Display<'_, '_> {
    fn fmt_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.formatter.cell_width;
        let title = match NaiveDate::from_ymd_opt(self.grid.year, self.grid.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.grid.year, self.grid.month),
        };
        write!(f, "{}", title.bold())?;

        let weekdays: Vec<String> = self
            .grid
            .week_start
            .weekdays()
            .iter()
            .map(|d| pad_to_width(&d.to_string(), width).bold().to_string())
            .collect();
        write!(f, "\n{}", weekdays.join("│"))?;

        let rule = vec!["─".repeat(width); 7].join("┼");
        for week in &self.grid.weeks {
            write!(f, "\n{rule}")?;

            let days: Vec<String> = week.iter().map(|c| format_day_number(c, width)).collect();
            write!(f, "\n{}", days.join("│"))?;

            let rows = week
                .iter()
                .map(|c| c.events.len())
                .max()
                .unwrap_or(0)
                .min(MAX_EVENTS_PER_CELL);
            for row in 0..rows {
                let cells: Vec<String> = week
                    .iter()
                    .map(|c| format_event_line(c, row, width))
                    .collect();
                write!(f, "\n{}", cells.join("│"))?;
            }
        }
        Ok(())
    }

    fn fmt_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<MonthEntry<'_>> = self
            .grid
            .cells()
            .flat_map(|c| {
                c.events.iter().map(move |&event| MonthEntry {
                    date: c.date,
                    event,
                })
            })
            .collect();

        if entries.is_empty() {
            return write!(f, "No events");
        }

        let columns = [
            MonthEntryColumn::Date,
            MonthEntryColumn::Time,
            MonthEntryColumn::Title,
        ];
        write!(f, "{}", Table::new(&columns, &entries).with_header(true))
    }
}

fn format_day_number(cell: &MonthCell<'_>, width: usize) -> String {
    let day = pad_to_width(&format!("{:>2}", cell.day), width);
    match cell.is_adjacent_month {
        true => day.dimmed().to_string(),
        false => day,
    }
}

/// The `row`-th event line of a cell. The last visible line turns into a
/// `+N more` marker when the cell holds more events than fit.
fn format_event_line(cell: &MonthCell<'_>, row: usize, width: usize) -> String {
    let overflow = cell.events.len() > MAX_EVENTS_PER_CELL;
    if overflow && row == MAX_EVENTS_PER_CELL - 1 {
        let more = format!("+{} more", cell.events.len() - row);
        return pad_to_width(&more, width).italic().to_string();
    }

    let Some(event) = cell.events.get(row) else {
        return " ".repeat(width);
    };
    let line = format!("{} {}", format_hour(event.start_hour), event.title);
    let line = pad_to_width(&truncate_to_width(&line, width), width);
    match (color_of(&event.color), cell.is_adjacent_month) {
        (_, true) => line.dimmed().to_string(),
        (Some(color), false) => line.color(color).to_string(),
        (None, false) => line,
    }
}

#[derive(Debug)]
struct MonthEntry<'a> {
    date: NaiveDate,
    event: &'a CalendarEvent,
}

#[derive(Debug, Clone, Copy)]
enum MonthEntryColumn {
    Date,
    Time,
    Title,
}

impl<'e> TableColumn<MonthEntry<'e>> for MonthEntryColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            MonthEntryColumn::Date => "Date",
            MonthEntryColumn::Time => "Time",
            MonthEntryColumn::Title => "Title",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a MonthEntry<'e>) -> Cow<'a, str> {
        match self {
            MonthEntryColumn::Date => data.date.format("%a %Y-%m-%d").to_string().into(),
            MonthEntryColumn::Time => format!(
                "{}~{}",
                format_hour(data.event.start_hour),
                format_hour(data.event.end_hour())
            )
            .into(),
            MonthEntryColumn::Title => data.event.title.as_str().into(),
        }
    }

    fn get_color(&self, data: &MonthEntry<'e>) -> Option<Color> {
        match self {
            MonthEntryColumn::Title => color_of(&data.event.color),
            _ => None,
        }
    }
}
