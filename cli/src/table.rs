// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::util::pad_to_width;

/// A plain text table, one row per item.
#[derive(Debug)]
pub struct Table<'a, C, T> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
    header: bool,
}

impl<'a, C: TableColumn<T>, T> Table<'a, C, T> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: " ",
            header: false,
        }
    }

    /// Print the column names as the first row.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn column_widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<usize> = match self.header {
            true => self.columns.iter().map(|c| c.name().width()).collect(),
            false => vec![0; self.columns.len()],
        };
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

impl<C: TableColumn<T>, T> fmt::Display for Table<'_, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|c| c.format(item)).collect())
            .collect();
        let widths = self.column_widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        if self.header {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (col, &w))| {
                    let cell = pad(&col.name(), w, col.padding_direction(), i == last);
                    cell.bold().to_string()
                })
                .collect();
            lines.push(cells.join(self.separator));
        }

        for (row, item) in rows.iter().zip(self.data) {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(row)
                .zip(&widths)
                .enumerate()
                .map(|(i, ((col, cell), &w))| {
                    let cell = pad(cell, w, col.padding_direction(), i == last);
                    match col.get_color(item) {
                        Some(color) => cell.color(color).to_string(),
                        None => cell,
                    }
                })
                .collect();
            lines.push(cells.join(self.separator));
        }

        write!(f, "{}", lines.join("\n"))
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    match direction {
        // Last column does not need padding if it's left-aligned
        PaddingDirection::Left if is_last => cell.to_string(),
        PaddingDirection::Left => pad_to_width(cell, width),
        PaddingDirection::Right => {
            let w = cell.width();
            format!("{}{cell}", " ".repeat(width.saturating_sub(w)))
        }
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}
