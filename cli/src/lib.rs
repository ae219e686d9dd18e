// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Teamcal - calendar layouts and world clocks for your team, in the terminal.

mod cli;
mod cmd_calendar;
mod cmd_clock;
mod cmd_generate_completion;
mod cmd_timezone;
mod config;
mod grid_formatter;
mod month_formatter;
mod placement_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::parse_config;
