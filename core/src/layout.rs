// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod bucket;
mod geometry;
mod lane;
mod month;

pub use bucket::{DayLayout, Placement, WeekLayout, bucket_day, bucket_week};
pub use geometry::{DEFAULT_PIXELS_PER_HOUR, Geometry, NowIndicator, TimeGrid, format_hour};
pub use lane::{Lane, assign_lanes};
pub use month::{MonthCell, MonthGrid, WeekStart, monday_of};
