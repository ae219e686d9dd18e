// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::NaiveDate;
use colored::{Color, Colorize};
use teamcal_core::LayoutParams;
use teamcal_core::layout::{DayLayout, NowIndicator, Placement, TimeGrid, format_hour};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::placement_formatter::{color_of, format_day};
use crate::util::{pad_to_width, truncate_to_width};

const SLOTS_PER_HOUR: u32 = 2;
const FIRST_HOUR: u32 = 8;
const LAST_HOUR: u32 = 18;
const GUTTER_WIDTH: usize = 6;
const DEFAULT_COLUMN_WIDTH: usize = 18;

/// Draws day columns as a text time grid, one row per half hour.
///
/// Rows are derived from the pixel geometry of each placement, and lanes
/// split a column horizontally. The visible hours cover 08:00 to 18:00 and
/// grow to include every event.
#[derive(Debug, Clone)]
pub struct GridFormatter {
    anchor: NaiveDate,
    grid: TimeGrid,
    now_indicator: NowIndicator,
    column_width: usize,
}

impl GridFormatter {
    pub fn new(params: &LayoutParams) -> Self {
        Self {
            anchor: params.anchor,
            grid: params.grid,
            now_indicator: params.now_indicator,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width.max(2);
        self
    }

    pub fn format<'a, 'p>(&'a self, columns: &'a [DayLayout<'p>]) -> Display<'a, 'p> {
        Display {
            columns,
            formatter: self,
        }
    }

    /// Whole hours shown, `[first, last)`.
    fn hour_range(&self, columns: &[DayLayout<'_>]) -> (u32, u32) {
        let track = self.grid.track_height();
        let pph = self.grid.pixels_per_hour;
        columns
            .iter()
            .flat_map(|c| &c.placements)
            .filter_map(|p| p.geometry.clamped(track))
            .fold((FIRST_HOUR, LAST_HOUR), |(first, last), g| {
                let start = (g.top / pph).floor() as u32;
                let end = (g.bottom() / pph).ceil() as u32;
                (first.min(start), last.max(end.min(24)))
            })
    }

    fn slot_height(&self) -> f64 {
        self.grid.pixels_per_hour / f64::from(SLOTS_PER_HOUR)
    }

    fn draw_column(&self, column: &DayLayout<'_>, first_hour: u32, rows: usize) -> Vec<Canvas> {
        let mut canvases = vec![Canvas::new(self.column_width); rows];
        let track = self.grid.track_height();
        let origin = f64::from(first_hour) * self.grid.pixels_per_hour;
        let slot = self.slot_height();

        for placement in &column.placements {
            let Some(g) = placement.geometry.clamped(track) else {
                tracing::debug!(id = placement.event.id, "event outside of the day, skipping");
                continue;
            };

            let first = ((g.top - origin) / slot).floor().max(0.0) as usize;
            let last = (((g.bottom() - origin) / slot).ceil() as usize)
                .max(first + 1)
                .min(rows);

            let (left, width) = placement.lane.span();
            let w = self.column_width as f64;
            let x = (left * w).round() as usize;
            let x_end = ((left + width) * w).round() as usize;

            let color = color_of(&placement.event.color);
            for (i, row) in (first..last).enumerate() {
                let text = block_line(placement, i);
                canvases[row].put(x, x_end.saturating_sub(x), &text, color);
            }
        }
        canvases
    }

    fn now_row(&self, first_hour: u32, rows: usize) -> Option<usize> {
        let offset = self.now_indicator.offset(&self.grid)?;
        let origin = f64::from(first_hour) * self.grid.pixels_per_hour;
        let row = ((offset - origin) / self.slot_height()).floor();
        (row >= 0.0 && (row as usize) < rows).then_some(row as usize)
    }
}

/// The text of the `i`-th row of an event block.
fn block_line(placement: &Placement<'_>, i: usize) -> String {
    let event = placement.event;
    match i {
        0 => format!("▎{}", event.title),
        1 => format!(
            "▎{}~{}",
            format_hour(event.start_hour),
            format_hour(event.end_hour())
        ),
        _ => "▎".to_string(),
    }
}

#[derive(Debug)]
pub struct Display<'a, 'p> {
    columns: &'a [DayLayout<'p>],
    formatter: &'a GridFormatter,
}

impl fmt::Display for Display<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatter = self.formatter;
        let (first_hour, last_hour) = formatter.hour_range(self.columns);
        let rows = (last_hour.saturating_sub(first_hour) * SLOTS_PER_HOUR) as usize;

        let mut columns: Vec<Vec<Canvas>> = self
            .columns
            .iter()
            .map(|c| formatter.draw_column(c, first_hour, rows))
            .collect();

        let now_row = formatter.now_row(first_hour, rows);
        if let Some(row) = now_row {
            for column in &mut columns {
                column[row].draw_now_line();
            }
        }

        // Header
        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let day = format_day(formatter.anchor, c.day_index);
                let day = truncate_to_width(&day, formatter.column_width);
                pad_to_width(&day, formatter.column_width).bold().to_string()
            })
            .collect();
        write!(f, "{}│{}", " ".repeat(GUTTER_WIDTH), headers.join("│"))?;

        for row in 0..rows {
            let slot = row as u32 % SLOTS_PER_HOUR;
            let label = if slot == 0 {
                let hour = first_hour + row as u32 / SLOTS_PER_HOUR;
                pad_to_width(&format!("{hour:02}:00"), GUTTER_WIDTH)
            } else if now_row == Some(row) {
                pad_to_width("now", GUTTER_WIDTH).red().to_string()
            } else {
                " ".repeat(GUTTER_WIDTH)
            };

            let cells: Vec<String> = columns.iter().map(|c| c[row].render()).collect();
            write!(f, "\n{label}│{}", cells.join("│"))?;
        }
        Ok(())
    }
}

/// One text row of a day column.
#[derive(Debug, Clone)]
struct Canvas {
    cells: Vec<Cell>,
}

#[derive(Debug, Clone)]
struct Cell {
    text: String,
    color: Option<Color>,
    filled: bool,
}

impl Cell {
    fn blank() -> Self {
        Self {
            text: " ".to_string(),
            color: None,
            filled: false,
        }
    }
}

impl Canvas {
    fn new(width: usize) -> Self {
        Self {
            cells: vec![Cell::blank(); width],
        }
    }

    /// Writes `text` into `[x, x + width)`, replacing whatever was there.
    fn put(&mut self, x: usize, width: usize, text: &str, color: Option<Color>) {
        let end = (x + width).min(self.cells.len());
        if x >= end {
            return;
        }

        // Do not leave half of a wide character behind
        if x > 0 && self.cells[x].text.is_empty() {
            self.cells[x - 1].text = " ".to_string();
        }
        if end < self.cells.len() && self.cells[end].text.is_empty() {
            self.cells[end].text = " ".to_string();
        }

        for cell in &mut self.cells[x..end] {
            *cell = Cell {
                text: " ".to_string(),
                color,
                filled: true,
            };
        }

        let mut i = x;
        for g in truncate_to_width(text, end - x).graphemes(true) {
            let w = g.width();
            if w == 0 {
                continue;
            }
            self.cells[i].text = g.to_string();
            for cell in &mut self.cells[i + 1..i + w] {
                cell.text = String::new();
            }
            i += w;
        }
    }

    fn draw_now_line(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| !c.filled) {
            cell.text = "─".to_string();
            cell.color = Some(Color::Red);
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut run_color = None;
        for cell in &self.cells {
            if cell.color != run_color {
                push_run(&mut out, &run, run_color);
                run.clear();
                run_color = cell.color;
            }
            run.push_str(&cell.text);
        }
        push_run(&mut out, &run, run_color);
        out
    }
}

fn push_run(out: &mut String, run: &str, color: Option<Color>) {
    match color {
        Some(color) => out.push_str(&run.color(color).to_string()),
        None => out.push_str(run),
    }
}

#[cfg(test)]
mod tests {
    use teamcal_core::layout::WeekLayout;
    use teamcal_core::{CalendarEvent, ColorTag, sample_events};

    use super::*;

    fn params() -> LayoutParams {
        LayoutParams::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    fn event(id: u32, title: &str, start_hour: f64, duration: f64) -> CalendarEvent {
        CalendarEvent {
            id,
            title: title.to_string(),
            start_hour,
            duration,
            day_index: 0,
            color: ColorTag::default(),
        }
    }

    #[test]
    fn draws_week_grid() {
        colored::control::set_override(false);
        let events = sample_events();
        let params = params();
        let week = WeekLayout::build(events.as_slice(), &params.grid);
        let out = GridFormatter::new(&params).format(&week.columns).to_string();
        let lines: Vec<&str> = out.lines().collect();

        // header + 10 hours of half-hour rows
        assert_eq!(lines.len(), 1 + 20);
        assert!(lines[0].contains("Mon 5"));
        assert!(lines[0].contains("Fri 9"));

        assert!(lines[5].starts_with("10:00"));
        assert!(lines[5].contains("▎Sprint Planning"));
        assert!(lines[6].contains("▎10:00~11:30"));
        assert!(!lines[8].split('│').nth(1).unwrap().contains('▎'));

        assert!(lines[4].contains("▎Team Sync"));
        assert!(lines[17].contains("▎Demo"));
    }

    #[test]
    fn draws_now_line_in_empty_cells() {
        colored::control::set_override(false);
        let events = sample_events();
        let params = params();
        let week = WeekLayout::build(events.as_slice(), &params.grid);
        let out = GridFormatter::new(&params).format(&week.columns).to_string();
        let lines: Vec<&str> = out.lines().collect();

        // 10:30 is the second slot of 10:00
        let now = lines[6];
        assert!(now.starts_with("now"));
        let cells: Vec<&str> = now.split('│').collect();
        assert!(cells[1].starts_with("▎10:00~11:30"));
        assert!(cells[2].chars().all(|c| c == '─'));
    }

    #[test]
    fn hides_now_line() {
        colored::control::set_override(false);
        let events = sample_events();
        let mut params = params();
        params.now_indicator = NowIndicator::Hidden;
        let week = WeekLayout::build(events.as_slice(), &params.grid);
        let out = GridFormatter::new(&params).format(&week.columns).to_string();
        assert!(!out.contains('─'));
        assert!(!out.contains("now"));
    }

    #[test]
    fn grows_hour_range_to_fit_events() {
        colored::control::set_override(false);
        let events = [event(1, "Early", 6.5, 1.0), event(2, "Late", 20.0, 1.5)];
        let params = params();
        let day = DayLayout::build(&events, 0, &params.grid);
        let out = GridFormatter::new(&params)
            .format(std::slice::from_ref(&day))
            .to_string();
        let lines: Vec<&str> = out.lines().collect();

        // 06:00 to 22:00
        assert_eq!(lines.len(), 1 + 32);
        assert!(lines[1].starts_with("06:00"));
        assert!(lines[2].contains("▎Early"));
        assert!(lines[29].contains("▎Late"));
    }

    #[test]
    fn splits_overlapping_events_into_lanes() {
        colored::control::set_override(false);
        let events = [event(1, "Alpha", 9.0, 1.0), event(2, "Beta", 9.0, 1.0)];
        let params = params();
        let day = DayLayout::build(&events, 0, &params.grid);
        let out = GridFormatter::new(&params)
            .with_column_width(20)
            .format(std::slice::from_ref(&day))
            .to_string();
        let lines: Vec<&str> = out.lines().collect();

        let row = lines[3].split('│').nth(1).unwrap();
        assert_eq!(row, "▎Alpha    ▎Beta     ");
    }

    #[test]
    fn clips_blocks_past_midnight() {
        colored::control::set_override(false);
        let events = [event(1, "Night Shift", 23.0, 3.0)];
        let params = params();
        let day = DayLayout::build(&events, 0, &params.grid);
        let out = GridFormatter::new(&params)
            .format(std::slice::from_ref(&day))
            .to_string();
        let lines: Vec<&str> = out.lines().collect();

        // 08:00 to 24:00
        assert_eq!(lines.len(), 1 + 32);
        assert!(lines[31].contains("▎Night Shift"));
        assert!(lines[32].contains("▎23:00~26:00"));
    }

    #[test]
    fn keeps_wide_titles_aligned() {
        colored::control::set_override(false);
        let mut canvas = Canvas::new(6);
        canvas.put(0, 6, "会议安排会议", None);
        assert_eq!(canvas.render(), "会议… ");
        assert_eq!(canvas.render().width(), 6);

        canvas.put(1, 2, "ab", None);
        assert_eq!(canvas.render().width(), 6);
    }
}
