// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::ViewMode;
use crate::layout::{DEFAULT_PIXELS_PER_HOUR, NowIndicator, TimeGrid, WeekStart};

/// The name of the application.
pub const APP_NAME: &str = "teamcal";

/// Configuration for the calendar core.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state, e.g. the timezone preferences.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// TOML file with the events to show. The demo week is used if unset.
    #[serde(default)]
    pub events_path: Option<PathBuf>,

    /// Vertical scale of the day and week grids.
    #[serde(default = "default_pixels_per_hour")]
    pub pixels_per_hour: f64,

    /// First column of the month grid.
    #[serde(default)]
    pub week_start: WeekStart,

    /// View shown when none is requested.
    #[serde(default)]
    pub default_view: ViewMode,

    /// Position of the static current-time line, `"HH:MM"` or `"off"`.
    #[serde(default)]
    pub now_indicator: NowIndicator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            events_path: None,
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
            week_start: WeekStart::default(),
            default_view: ViewMode::default(),
            now_indicator: NowIndicator::default(),
        }
    }
}

fn default_pixels_per_hour() -> f64 {
    DEFAULT_PIXELS_PER_HOUR
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if !self.pixels_per_hour.is_finite() || self.pixels_per_hour <= 0.0 {
            return Err(format!(
                "pixels_per_hour must be a positive number, got {}",
                self.pixels_per_hour
            )
            .into());
        }

        // Normalize events path
        if let Some(path) = &self.events_path {
            self.events_path = Some(
                expand_path(path).map_err(|e| format!("Failed to expand events path: {e}"))?,
            );
        }

        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!("Failed to get state directory: {e}"),
            },
        };

        Ok(())
    }

    pub fn time_grid(&self) -> TimeGrid {
        TimeGrid::new(self.pixels_per_hour)
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

/// The user-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/Documents"))).unwrap();
            assert_eq!(result, home.join("Documents"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_config() {
        let config_dir = get_config_dir().unwrap();
        let config_prefixes: &[&str] = if cfg!(unix) {
            &["$XDG_CONFIG_HOME", "${XDG_CONFIG_HOME}"]
        } else {
            &[r"%LOCALAPPDATA%"]
        };
        for prefix in config_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/events.toml"))).unwrap();
            assert_eq!(result, config_dir.join("events.toml"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute() {
        let absolute_path = PathBuf::from("/etc/passwd");
        let result = expand_path(&absolute_path).unwrap();
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn test_expand_path_relative() {
        let relative_path = PathBuf::from("relative/path/to/file");
        let result = expand_path(&relative_path).unwrap();
        assert_eq!(result, relative_path);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.time_grid(), TimeGrid::default());
    }

    #[test]
    fn test_deserialize_full() {
        let config: Config = toml::from_str(
            r#"
state_dir = "/tmp/teamcal"
events_path = "/tmp/events.toml"
pixels_per_hour = 48
week_start = "monday"
default_view = "month"
now_indicator = "09:15"
"#,
        )
        .unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/teamcal")));
        assert_eq!(config.events_path, Some(PathBuf::from("/tmp/events.toml")));
        assert_eq!(config.pixels_per_hour, 48.0);
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.default_view, ViewMode::Month);
        assert_eq!(
            config.now_indicator,
            NowIndicator::Fixed(NaiveTime::from_hms_opt(9, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_normalize_rejects_bad_scale() {
        let mut config = Config {
            pixels_per_hour: 0.0,
            state_dir: Some(PathBuf::from("/tmp/teamcal")),
            ..Default::default()
        };
        assert!(config.normalize().is_err());
    }

    #[test]
    fn test_normalize_keeps_absolute_paths() {
        let mut config = Config {
            state_dir: Some(PathBuf::from("/tmp/teamcal")),
            events_path: Some(PathBuf::from("/tmp/events.toml")),
            ..Default::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/teamcal")));
        assert_eq!(config.events_path, Some(PathBuf::from("/tmp/events.toml")));
    }
}
