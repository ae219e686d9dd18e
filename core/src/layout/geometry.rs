// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::de;

use crate::event::HOURS_PER_DAY;

/// Vertical scale of the day and week grids.
pub const DEFAULT_PIXELS_PER_HOUR: f64 = 60.0;

/// A fixed 24-hour vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeGrid {
    pub pixels_per_hour: f64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
        }
    }
}

impl TimeGrid {
    pub fn new(pixels_per_hour: f64) -> Self {
        Self { pixels_per_hour }
    }

    /// Height of the whole 24-hour track.
    pub fn track_height(&self) -> f64 {
        HOURS_PER_DAY * self.pixels_per_hour
    }

    /// Maps a start hour and a duration to a block on the axis.
    ///
    /// Nothing is clamped: an event running past midnight extends below the
    /// track, and a negative start lands above it.
    pub fn geometry(&self, start_hour: f64, duration: f64) -> Geometry {
        Geometry {
            top: snap(start_hour * self.pixels_per_hour),
            height: snap(duration * self.pixels_per_hour),
        }
    }

    /// Vertical offset of a wall-clock time.
    pub fn offset_of(&self, time: NaiveTime) -> f64 {
        let seconds = f64::from(time.num_seconds_from_midnight());
        seconds / 3600.0 * self.pixels_per_hour
    }
}

/// Drops binary rounding noise below a micro-pixel, so `0.3 * 60.0` is `18.0`.
fn snap(px: f64) -> f64 {
    (px * 1e6).round() / 1e6
}

/// Pixel block of an event on a [`TimeGrid`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Geometry {
    pub top: f64,
    pub height: f64,
}

impl Geometry {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The part of the block visible on a track of the given height, if any.
    pub fn clamped(&self, track_height: f64) -> Option<Geometry> {
        let top = self.top.max(0.0);
        let bottom = self.bottom().min(track_height);
        (bottom > top).then(|| Geometry {
            top,
            height: bottom - top,
        })
    }
}

/// The red "current time" line drawn across the day and week grids.
///
/// It is a static marker: the position is configured, never derived from the
/// system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NowIndicator {
    /// Draw the line at a fixed time of day.
    Fixed(NaiveTime),

    /// Do not draw the line.
    Hidden,
}

impl Default for NowIndicator {
    fn default() -> Self {
        // 10:30, always valid
        NowIndicator::Fixed(NaiveTime::from_hms_opt(10, 30, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl NowIndicator {
    /// Offset of the line on the grid, `None` when hidden.
    pub fn offset(&self, grid: &TimeGrid) -> Option<f64> {
        match self {
            NowIndicator::Fixed(time) => Some(grid.offset_of(*time)),
            NowIndicator::Hidden => None,
        }
    }
}

impl serde::Serialize for NowIndicator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            NowIndicator::Fixed(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            NowIndicator::Hidden => serializer.serialize_str("off"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for NowIndicator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct NowIndicatorVisitor;

        impl de::Visitor<'_> for NowIndicatorVisitor {
            type Value = NowIndicator;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a time like "HH:MM", or "off""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match value.trim() {
                    "off" | "none" | "hidden" => Ok(NowIndicator::Hidden),
                    s => NaiveTime::parse_from_str(s, "%H:%M")
                        .map(NowIndicator::Fixed)
                        .map_err(|e| de::Error::custom(format!("invalid time {s:?}: {e}"))),
                }
            }
        }

        deserializer.deserialize_str(NowIndicatorVisitor)
    }
}

/// Formats fractional hours as `HH:MM`, e.g. `9.5` is `09:30`.
///
/// Hours past midnight keep counting, so `25.0` is `25:00`.
pub fn format_hour(hour: f64) -> String {
    let minutes = (hour * 60.0).round() as i64;
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_hours_to_pixels() {
        let grid = TimeGrid::default();
        assert_eq!(grid.geometry(10.0, 1.5), Geometry { top: 600.0, height: 90.0 });
        assert_eq!(grid.geometry(9.5, 0.5), Geometry { top: 570.0, height: 30.0 });
        assert_eq!(grid.geometry(0.0, 24.0).bottom(), grid.track_height());
    }

    #[test]
    fn keeps_one_decimal_hours_exact() {
        let grid = TimeGrid::default();
        for tenths in 0..240 {
            let hour = f64::from(tenths) / 10.0;
            let g = grid.geometry(hour, hour + 0.1);
            assert_eq!(g.top, f64::from(tenths) * 6.0, "start hour {hour}");
            assert_eq!(g.height, f64::from(tenths + 1) * 6.0, "duration {}", hour + 0.1);
        }
    }

    #[test]
    fn does_not_clamp_overflowing_events() {
        let grid = TimeGrid::default();
        let g = grid.geometry(23.0, 3.0);
        assert_eq!(g.top, 1380.0);
        assert_eq!(g.height, 180.0);
        assert!(g.bottom() > grid.track_height());
    }

    #[test]
    fn clamps_on_request() {
        let track = TimeGrid::default().track_height();
        let g = Geometry { top: 1380.0, height: 180.0 };
        assert_eq!(g.clamped(track), Some(Geometry { top: 1380.0, height: 60.0 }));

        let above = Geometry { top: -30.0, height: 60.0 };
        assert_eq!(above.clamped(track), Some(Geometry { top: 0.0, height: 30.0 }));

        let below = Geometry { top: 1500.0, height: 60.0 };
        assert_eq!(below.clamped(track), None);
    }

    #[test]
    fn scales_with_custom_grid() {
        let grid = TimeGrid::new(48.0);
        assert_eq!(grid.geometry(2.5, 0.25), Geometry { top: 120.0, height: 12.0 });
        assert_eq!(grid.track_height(), 1152.0);
    }

    #[test]
    fn default_now_indicator_sits_at_half_past_ten() {
        let grid = TimeGrid::default();
        assert_eq!(NowIndicator::default().offset(&grid), Some(630.0));
        assert_eq!(NowIndicator::Hidden.offset(&grid), None);
    }

    #[test]
    fn deserializes_now_indicator() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            now: NowIndicator,
        }

        let w: Wrapper = toml::from_str(r#"now = "08:15""#).unwrap();
        assert_eq!(
            w.now,
            NowIndicator::Fixed(NaiveTime::from_hms_opt(8, 15, 0).unwrap())
        );

        let w: Wrapper = toml::from_str(r#"now = "off""#).unwrap();
        assert_eq!(w.now, NowIndicator::Hidden);

        assert!(toml::from_str::<Wrapper>(r#"now = "25:99""#).is_err());
    }

    #[test]
    fn formats_fractional_hours() {
        assert_eq!(format_hour(9.5), "09:30");
        assert_eq!(format_hour(10.0), "10:00");
        assert_eq!(format_hour(11.5), "11:30");
        assert_eq!(format_hour(23.75), "23:45");
        assert_eq!(format_hour(25.0), "25:00");
    }
}
