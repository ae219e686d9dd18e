// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar layout engine: day and week time grids, month grids, the view
//! selector and the timezone preferences of the clock widgets.

mod config;
mod event;
pub mod layout;
mod teamcal;
pub mod timezone;
mod view;

pub use crate::config::{APP_NAME, Config, expand_path, get_config_dir};
pub use crate::event::{
    CalendarEvent, ColorTag, DAYS_PER_WEEK, EventError, EventSet, HOURS_PER_DAY, sample_events,
    weekday_of,
};
pub use crate::teamcal::Teamcal;
pub use crate::view::{CalendarView, Layout, LayoutParams, ViewMode};
